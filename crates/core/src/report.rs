//! Run report rendering

use crate::diff::DriftReport;
use crate::digest::HashAlgorithm;
use crate::error::{Result, SivError};
use crate::snapshot::MalformedLine;
use std::path::{Path, PathBuf};

/// Run statistics plus the ordered warning list
///
/// Created once at the end of a run, write-only. `drift` is `None` for an
/// initialization run and always present for a verification run, even when
/// no drift was detected.
#[derive(Debug)]
pub struct Report {
    pub directory: PathBuf,
    pub verification_file: PathBuf,
    pub algorithm: HashAlgorithm,
    pub files_parsed: usize,
    pub dirs_parsed: usize,
    pub drift: Option<DriftReport>,
    pub elapsed_secs: u64,
}

impl Report {
    /// Render the `key: value` header lines followed by the warning section
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("SIV Report File\n");
        out.push_str(&format!("Directory: {}\n", self.directory.display()));
        out.push_str(&format!(
            "Verification File: {}\n",
            self.verification_file.display()
        ));
        out.push_str(&format!("Hash Function: {}\n", self.algorithm));
        out.push_str(&format!("Number of Parsed Files: {}\n", self.files_parsed));
        out.push_str(&format!(
            "Number of Parsed Directories: {}\n",
            self.dirs_parsed
        ));

        let mode = match &self.drift {
            Some(drift) => {
                out.push_str(&format!("Number of Deleted Files: {}\n", drift.deleted.len()));
                out.push_str(&format!("Number of New Files: {}\n", drift.new.len()));
                out.push_str(&format!("Number of Changed Files: {}\n", drift.changed.len()));
                "Verification"
            }
            None => "Initialization",
        };
        out.push_str(&format!(
            "Time of {} (in seconds): {}\n",
            mode, self.elapsed_secs
        ));

        out.push_str("Warnings:\n");
        if let Some(drift) = &self.drift {
            for warning in warnings(drift) {
                out.push_str(&warning);
                out.push('\n');
            }
        }
        out
    }

    /// Write the rendered report
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())
            .map_err(|e| SivError::io(format!("failed to write report file {}", path.display()), e))
    }
}

/// Build the ordered warning list: malformed lines first, then deleted,
/// new, and changed paths with their field deltas inlined
pub fn warnings(drift: &DriftReport) -> Vec<String> {
    let mut out = Vec::new();

    for malformed in &drift.malformed {
        out.push(malformed_warning(malformed));
    }
    for path in &drift.deleted {
        out.push(format!("{} is deleted", path.display()));
    }
    for path in &drift.new {
        out.push(format!("{} is new", path.display()));
    }
    for entry in &drift.changed {
        let deltas: Vec<String> = entry
            .deltas
            .iter()
            .map(|d| format!("{} {} -> {}", d.field.label(), d.old, d.new))
            .collect();
        out.push(format!(
            "{} is changed: {}",
            entry.path.display(),
            deltas.join(", ")
        ));
    }

    out
}

fn malformed_warning(malformed: &MalformedLine) -> String {
    let body = format!(
        "verification file line {} is malformed (expected 7 fields, found {}); entry skipped",
        malformed.line, malformed.found
    );
    match &malformed.path {
        Some(path) => format!("{}: {}", path.display(), body),
        None => body,
    }
}
