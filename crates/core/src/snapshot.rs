//! Verification-file model: writer and reader

use crate::digest::HashAlgorithm;
use crate::error::{Result, SivError};
use crate::record::Record;
use crate::walk::RecordSet;
use std::path::{Path, PathBuf};

/// First line of every verification file
pub const TITLE_LINE: &str = "SIV Verification File";
/// Fourth line: the tab-separated column header
pub const COLUMN_HEADER: &str =
    "File Name\tFile Size\tOwner\tGroup\tAccess Rights\tLast Modified\tHash";

const DIRECTORY_PREFIX: &str = "Directory: ";
const HASH_FUNCTION_PREFIX: &str = "Hash Function: ";

/// A persisted point-in-time record set for a directory tree
///
/// Created in one pass, persisted once, never mutated afterwards; a
/// verification run builds a fresh in-memory record set instead.
#[derive(Debug)]
pub struct Snapshot {
    /// The monitored directory (absolute)
    pub directory: PathBuf,
    pub algorithm: HashAlgorithm,
    pub records: RecordSet,
}

/// A data line skipped during parsing because its column count was wrong
///
/// Skipped lines are excluded from both comparison directions and surfaced
/// once as a report warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number in the verification file
    pub line: usize,
    /// Columns found (expected 7)
    pub found: usize,
    /// First column, when non-empty
    pub path: Option<PathBuf>,
}

impl Snapshot {
    /// Render the header lines plus one tab-separated line per record, in
    /// ascending path order
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(TITLE_LINE);
        out.push('\n');
        out.push_str(&format!("{}{}\n", DIRECTORY_PREFIX, self.directory.display()));
        out.push_str(&format!("{}{}\n", HASH_FUNCTION_PREFIX, self.algorithm));
        out.push_str(COLUMN_HEADER);
        out.push('\n');
        for record in self.records.values() {
            out.push_str(&record.to_line());
            out.push('\n');
        }
        out
    }

    /// Persist the snapshot
    ///
    /// No partial-write recovery is attempted: a failed write leaves an
    /// undefined or truncated file, surfaced to the caller.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render()).map_err(|e| {
            SivError::io(format!("failed to write verification file {}", path.display()), e)
        })
    }

    /// Parse persisted verification-file text
    ///
    /// Missing or structurally unparsable header lines fail with
    /// `MalformedSnapshot`; an unknown algorithm identifier fails with
    /// `UnsupportedAlgorithm`. Data lines whose column count is not exactly
    /// 7 are collected as [`MalformedLine`]s, never fatal.
    pub fn parse(text: &str) -> Result<(Self, Vec<MalformedLine>)> {
        let mut lines = text.lines();

        let title = lines
            .next()
            .ok_or_else(|| SivError::MalformedSnapshot("file is empty".to_string()))?;
        if title != TITLE_LINE {
            return Err(SivError::MalformedSnapshot(format!(
                "unexpected title line: {title:?}"
            )));
        }

        let directory = lines
            .next()
            .and_then(|line| line.strip_prefix(DIRECTORY_PREFIX))
            .map(PathBuf::from)
            .ok_or_else(|| SivError::MalformedSnapshot("missing Directory header".to_string()))?;

        let algorithm = lines
            .next()
            .and_then(|line| line.strip_prefix(HASH_FUNCTION_PREFIX))
            .ok_or_else(|| {
                SivError::MalformedSnapshot("missing Hash Function header".to_string())
            })?
            .parse::<HashAlgorithm>()?;

        lines
            .next()
            .ok_or_else(|| SivError::MalformedSnapshot("missing column header".to_string()))?;

        let mut records = RecordSet::new();
        let mut malformed = Vec::new();
        for (index, line) in lines.enumerate() {
            let line_number = index + 5;
            if line.is_empty() {
                continue;
            }
            match Record::from_line(line, line_number) {
                Ok(record) => {
                    records.insert(record.path.clone(), record);
                }
                Err(SivError::MalformedRecord { line: n, found }) => {
                    let first_column = line.split('\t').next().unwrap_or("");
                    let path =
                        (!first_column.is_empty()).then(|| PathBuf::from(first_column));
                    tracing::warn!(
                        line = n,
                        found,
                        "skipping malformed verification file line"
                    );
                    malformed.push(MalformedLine { line: n, found, path });
                }
                Err(other) => return Err(other),
            }
        }

        Ok((
            Self {
                directory,
                algorithm,
                records,
            },
            malformed,
        ))
    }

    /// Read and parse a persisted verification file
    pub fn read_from(path: &Path) -> Result<(Self, Vec<MalformedLine>)> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SivError::io(format!("failed to read verification file {}", path.display()), e)
        })?;
        Self::parse(&text)
    }
}
