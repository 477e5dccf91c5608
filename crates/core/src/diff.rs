//! Reconciliation of a baseline record set against a fresh scan

use crate::record::Record;
use crate::snapshot::MalformedLine;
use crate::walk::RecordSet;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A comparable record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Size,
    Owner,
    Group,
    Mode,
    Modified,
    Digest,
}

impl FieldKind {
    /// Label used in changed-file warnings
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Size => "file size",
            FieldKind::Owner => "owner",
            FieldKind::Group => "group",
            FieldKind::Mode => "access rights",
            FieldKind::Modified => "last modified",
            FieldKind::Digest => "hash",
        }
    }
}

/// One differing field, old and new values carried verbatim for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDelta {
    pub field: FieldKind,
    pub old: String,
    pub new: String,
}

/// A path present in both record sets with at least one differing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedEntry {
    pub path: PathBuf,
    pub deltas: Vec<FieldDelta>,
}

/// Classification of paths across baseline and current record sets
///
/// The three buckets partition the union of both path sets minus the
/// unchanged intersection; unchanged paths are not retained individually.
#[derive(Debug, Default)]
pub struct DriftReport {
    pub changed: Vec<ChangedEntry>,
    pub deleted: Vec<PathBuf>,
    pub new: Vec<PathBuf>,
    /// Baseline lines excluded from comparison during parsing
    pub malformed: Vec<MalformedLine>,
}

impl DriftReport {
    /// True when no drift was detected and no baseline line was skipped
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty()
            && self.deleted.is_empty()
            && self.new.is_empty()
            && self.malformed.is_empty()
    }
}

/// Reconcile `baseline` against `current`, classifying every path as
/// unchanged, changed, deleted or new
///
/// Comparison is purely structural per-field string equality; a rename is
/// one `deleted` plus one `new`, since path is the sole identity key. Paths
/// named by malformed baseline lines are excluded from both directions:
/// they are absent from the baseline set and skipped when scanning current
/// for new entries.
pub fn reconcile(
    baseline: &RecordSet,
    current: &RecordSet,
    malformed: &[MalformedLine],
) -> DriftReport {
    let mut report = DriftReport {
        malformed: malformed.to_vec(),
        ..DriftReport::default()
    };

    let excluded: HashSet<&Path> = malformed
        .iter()
        .filter_map(|m| m.path.as_deref())
        .collect();

    for (path, base) in baseline {
        match current.get(path) {
            None => report.deleted.push(path.clone()),
            Some(cur) => {
                let deltas = compare_records(base, cur);
                if !deltas.is_empty() {
                    report.changed.push(ChangedEntry {
                        path: path.clone(),
                        deltas,
                    });
                }
            }
        }
    }

    for path in current.keys() {
        if !baseline.contains_key(path) && !excluded.contains(path.as_path()) {
            report.new.push(path.clone());
        }
    }

    report
}

/// Compare two records field by field
///
/// Digest comparison is skipped when both records are directories, matching
/// the record builder's sentinel behavior.
fn compare_records(base: &Record, cur: &Record) -> Vec<FieldDelta> {
    let mut fields = vec![
        (FieldKind::Size, &base.size, &cur.size),
        (FieldKind::Owner, &base.owner, &cur.owner),
        (FieldKind::Group, &base.group, &cur.group),
        (FieldKind::Mode, &base.mode, &cur.mode),
        (FieldKind::Modified, &base.modified, &cur.modified),
    ];
    if !(base.is_directory && cur.is_directory) {
        fields.push((FieldKind::Digest, &base.digest, &cur.digest));
    }

    fields
        .into_iter()
        .filter(|(_, old, new)| old != new)
        .map(|(field, old, new)| FieldDelta {
            field,
            old: old.clone(),
            new: new.clone(),
        })
        .collect()
}
