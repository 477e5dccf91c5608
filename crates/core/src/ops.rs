//! Top-level initialize / verify operations
//!
//! All validation runs eagerly before any filesystem mutation: a validation
//! error never leaves a partial verification file or report behind. Errors
//! propagate to the caller; nothing here terminates the process.

use crate::digest::HashAlgorithm;
use crate::error::{Result, SivError};
use crate::report::Report;
use crate::snapshot::Snapshot;
use crate::walk::scan_tree;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Inputs for an initialization run
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// The directory to snapshot (absolute)
    pub directory: PathBuf,
    pub verification_file: PathBuf,
    pub report_file: PathBuf,
    pub algorithm: HashAlgorithm,
}

/// Outcome of an initialization run
#[derive(Debug)]
pub struct InitSummary {
    pub verification_file: PathBuf,
    pub report_file: PathBuf,
    pub files_parsed: usize,
    pub dirs_parsed: usize,
    pub elapsed_secs: u64,
}

/// Inputs for a verification run
///
/// The monitored directory and hash algorithm come from the verification
/// file header, not from the caller.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub verification_file: PathBuf,
    pub report_file: PathBuf,
}

/// Outcome of a verification run
#[derive(Debug)]
pub struct VerifySummary {
    pub report_file: PathBuf,
    pub files_parsed: usize,
    pub dirs_parsed: usize,
    pub changed: usize,
    pub deleted: usize,
    pub new: usize,
    pub elapsed_secs: u64,
}

/// Snapshot a directory tree into a verification file, then write the run
/// report
pub fn initialize(opts: &InitOptions) -> Result<InitSummary> {
    let start = Instant::now();

    validate_run_paths(&opts.directory, &opts.verification_file, &opts.report_file)?;

    tracing::info!(
        directory = %opts.directory.display(),
        algorithm = %opts.algorithm,
        "initializing snapshot"
    );
    let tree = scan_tree(&opts.directory, opts.algorithm)?;

    let snapshot = Snapshot {
        directory: opts.directory.clone(),
        algorithm: opts.algorithm,
        records: tree.records,
    };
    snapshot.write_to(&opts.verification_file)?;

    let elapsed_secs = start.elapsed().as_secs();
    let report = Report {
        directory: opts.directory.clone(),
        verification_file: opts.verification_file.clone(),
        algorithm: opts.algorithm,
        files_parsed: tree.file_count,
        dirs_parsed: tree.dir_count,
        drift: None,
        elapsed_secs,
    };
    report.write_to(&opts.report_file)?;

    tracing::info!(
        files = tree.file_count,
        directories = tree.dir_count,
        "initialization complete"
    );
    Ok(InitSummary {
        verification_file: opts.verification_file.clone(),
        report_file: opts.report_file.clone(),
        files_parsed: tree.file_count,
        dirs_parsed: tree.dir_count,
        elapsed_secs,
    })
}

/// Verify a directory tree against its verification file, then write the
/// run report
pub fn verify(opts: &VerifyOptions) -> Result<VerifySummary> {
    let start = Instant::now();

    let (baseline, malformed) = Snapshot::read_from(&opts.verification_file)?;
    validate_run_paths(&baseline.directory, &opts.verification_file, &opts.report_file)?;

    tracing::info!(
        directory = %baseline.directory.display(),
        algorithm = %baseline.algorithm,
        "verifying against snapshot"
    );
    let tree = scan_tree(&baseline.directory, baseline.algorithm)?;
    let drift = crate::diff::reconcile(&baseline.records, &tree.records, &malformed);

    let elapsed_secs = start.elapsed().as_secs();
    let summary = VerifySummary {
        report_file: opts.report_file.clone(),
        files_parsed: tree.file_count,
        dirs_parsed: tree.dir_count,
        changed: drift.changed.len(),
        deleted: drift.deleted.len(),
        new: drift.new.len(),
        elapsed_secs,
    };

    let report = Report {
        directory: baseline.directory.clone(),
        verification_file: opts.verification_file.clone(),
        algorithm: baseline.algorithm,
        files_parsed: tree.file_count,
        dirs_parsed: tree.dir_count,
        drift: Some(drift),
        elapsed_secs,
    };
    report.write_to(&opts.report_file)?;

    tracing::info!(
        changed = summary.changed,
        deleted = summary.deleted,
        new = summary.new,
        "verification complete"
    );
    Ok(summary)
}

/// Eager validation shared by both modes
///
/// Containment is path-segment-aware (`Path::starts_with` compares whole
/// components), so `/data2/v` is not treated as inside `/data`.
fn validate_run_paths(
    directory: &Path,
    verification_file: &Path,
    report_file: &Path,
) -> Result<()> {
    if !directory.is_dir() {
        return Err(SivError::PathNotFound(directory.to_path_buf()));
    }
    if verification_file.starts_with(directory) {
        return Err(SivError::PathConflict(
            "the verification file is inside the monitored directory".to_string(),
        ));
    }
    if report_file.starts_with(directory) {
        return Err(SivError::PathConflict(
            "the report file is inside the monitored directory".to_string(),
        ));
    }
    if verification_file == report_file {
        return Err(SivError::PathConflict(
            "the verification file and the report file are the same path".to_string(),
        ));
    }
    if report_file.extension().and_then(|e| e.to_str()) != Some("txt") {
        return Err(SivError::InvalidExtension(report_file.to_path_buf()));
    }
    Ok(())
}
