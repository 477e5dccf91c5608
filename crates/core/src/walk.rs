//! Deterministic recursive directory walker

use crate::digest::HashAlgorithm;
use crate::error::{Result, SivError};
use crate::record::{build_record, Record};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Record set keyed by absolute path
///
/// The ordered map makes every downstream iteration (serialization,
/// reconciliation, warning emission) deterministic by construction.
pub type RecordSet = BTreeMap<PathBuf, Record>;

/// Result of one full scan: the record set plus entry counts for the report
#[derive(Debug)]
pub struct WalkedTree {
    pub records: RecordSet,
    pub file_count: usize,
    pub dir_count: usize,
}

/// Lazily walk the full recursive contents of `root`, excluding the root
/// itself
///
/// The sequence is finite, not restartable once consumed, and ordered
/// lexicographically by file name per directory level so that snapshot
/// output is reproducible across runs on an unchanged tree. Symlinks are
/// not followed during traversal; a link to a directory is yielded as a
/// single entry without descending into it.
pub fn walk(root: &Path) -> impl Iterator<Item = walkdir::Result<walkdir::DirEntry>> {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
}

/// Walk `root` and build the canonical record for every entry
pub fn scan_tree(root: &Path, algorithm: HashAlgorithm) -> Result<WalkedTree> {
    let mut records = RecordSet::new();
    let mut file_count = 0usize;
    let mut dir_count = 0usize;

    for entry in walk(root) {
        let entry = entry.map_err(|e| {
            let context = match e.path() {
                Some(path) => format!("failed to read directory entry {}", path.display()),
                None => format!("failed to walk {}", root.display()),
            };
            SivError::io(context, e.into())
        })?;

        let record = build_record(entry.path(), algorithm)?;
        if record.is_directory {
            dir_count += 1;
        } else {
            file_count += 1;
        }
        records.insert(record.path.clone(), record);
    }

    tracing::debug!(
        root = %root.display(),
        files = file_count,
        directories = dir_count,
        "tree scan complete"
    );

    Ok(WalkedTree {
        records,
        file_count,
        dir_count,
    })
}
