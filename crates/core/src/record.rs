//! Canonical metadata records for filesystem entries

use crate::digest::{digest_file, HashAlgorithm};
use crate::error::{Result, SivError};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Digest column sentinel for directory records (digests are never computed
/// for directories)
pub const DIRECTORY_SENTINEL: &str = "directory";

/// One filesystem entry at snapshot time
///
/// Comparable fields are held in their canonical serialized form: parsed
/// verification-file lines are not re-validated beyond column splitting, so
/// the string form is the comparison domain. [`build_record`] performs the
/// typed-to-canonical normalization exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Absolute path, the unique key within a record set
    pub path: PathBuf,
    pub is_directory: bool,
    /// Decimal byte count for files, `0` for directories
    pub size: String,
    /// Resolved owner name, numeric uid when resolution fails
    pub owner: String,
    /// Resolved group name, numeric gid when resolution fails
    pub group: String,
    /// Octal permission bits, owner/group/other rwx only
    pub mode: String,
    /// UTC modification time, second precision, `YYYY-MM-DD HH:MM:SS`
    pub modified: String,
    /// Lowercase hex digest for files, [`DIRECTORY_SENTINEL`] for directories
    pub digest: String,
}

impl Record {
    /// Serialize to one tab-separated verification-file line (no newline)
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.path.display(),
            self.size,
            self.owner,
            self.group,
            self.mode,
            self.modified,
            self.digest
        )
    }

    /// Parse one tab-separated data line
    ///
    /// Lines are not re-validated beyond column splitting; a column count
    /// other than 7 is a [`SivError::MalformedRecord`] condition, recovered
    /// by the caller rather than fatal.
    pub fn from_line(line: &str, line_number: usize) -> Result<Self> {
        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() != 7 {
            return Err(SivError::MalformedRecord {
                line: line_number,
                found: columns.len(),
            });
        }

        let digest = columns[6].to_string();
        Ok(Self {
            path: PathBuf::from(columns[0]),
            is_directory: digest == DIRECTORY_SENTINEL,
            size: columns[1].to_string(),
            owner: columns[2].to_string(),
            group: columns[3].to_string(),
            mode: columns[4].to_string(),
            modified: columns[5].to_string(),
            digest,
        })
    }
}

/// Build the canonical record for one filesystem entry
///
/// Metadata is read into locally-scoped per-call values (`std::fs::metadata`
/// follows symlinks, so a link is recorded as its target's kind). Files are
/// digested with the snapshot's algorithm; directories get the sentinel.
pub fn build_record(path: &Path, algorithm: HashAlgorithm) -> Result<Record> {
    use std::os::unix::fs::MetadataExt;

    let meta = std::fs::metadata(path)
        .map_err(|e| SivError::io(format!("failed to stat {}", path.display()), e))?;
    let is_directory = meta.is_dir();

    let digest = if is_directory {
        DIRECTORY_SENTINEL.to_string()
    } else {
        digest_file(algorithm, path)?
    };

    Ok(Record {
        path: path.to_path_buf(),
        is_directory,
        size: if is_directory { "0".to_string() } else { meta.len().to_string() },
        owner: resolve_owner(meta.uid()),
        group: resolve_group(meta.gid()),
        mode: format!("{:o}", meta.mode() & 0o777),
        modified: format_mtime(meta.mtime(), path)?,
        digest,
    })
}

/// Resolve a uid to a user name, falling back to the numeric id
fn resolve_owner(uid: u32) -> String {
    match nix::unistd::User::from_uid(nix::unistd::Uid::from_raw(uid)) {
        Ok(Some(user)) => user.name,
        _ => uid.to_string(),
    }
}

/// Resolve a gid to a group name, falling back to the numeric id
fn resolve_group(gid: u32) -> String {
    match nix::unistd::Group::from_gid(nix::unistd::Gid::from_raw(gid)) {
        Ok(Some(group)) => group.name,
        _ => gid.to_string(),
    }
}

/// Format a unix mtime as UTC, truncated to second precision
fn format_mtime(mtime_secs: i64, path: &Path) -> Result<String> {
    let utc: DateTime<Utc> = DateTime::from_timestamp(mtime_secs, 0).ok_or_else(|| {
        SivError::io(
            format!("modification time out of range for {}", path.display()),
            std::io::Error::from(std::io::ErrorKind::InvalidData),
        )
    })?;
    Ok(utc.format("%Y-%m-%d %H:%M:%S").to_string())
}
