//! Integration tests driving the siv binary

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the siv binary path
fn siv_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("Failed to get current exe");
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps directory
    path.push("siv");
    path
}

fn run_siv(args: &[&str]) -> Result<std::process::Output> {
    Ok(Command::new(siv_bin()).args(args).output()?)
}

struct Fixture {
    _out: TempDir,
    monitored: TempDir,
    verification_file: PathBuf,
    report_file: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let out = TempDir::new().unwrap();
        let monitored = TempDir::new().unwrap();
        let verification_file = out.path().join("verification");
        let report_file = out.path().join("report.txt");
        Self {
            _out: out,
            monitored,
            verification_file,
            report_file,
        }
    }

    fn root(&self) -> &Path {
        self.monitored.path()
    }

    fn init_args(&self) -> Vec<String> {
        vec![
            "-i".to_string(),
            "-D".to_string(),
            self.root().display().to_string(),
            "-V".to_string(),
            self.verification_file.display().to_string(),
            "-R".to_string(),
            self.report_file.display().to_string(),
            "-H".to_string(),
            "md5".to_string(),
        ]
    }

    fn verify_args(&self) -> Vec<String> {
        vec![
            "-v".to_string(),
            "-V".to_string(),
            self.verification_file.display().to_string(),
            "-R".to_string(),
            self.report_file.display().to_string(),
        ]
    }
}

fn run_siv_owned(args: &[String]) -> Result<std::process::Output> {
    let refs: Vec<&str> = args.iter().map(String::as_str).collect();
    run_siv(&refs)
}

#[test]
fn test_help_mode() -> Result<()> {
    let output = run_siv(&["-h"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: siv"));
    assert!(stdout.contains("initialization mode"));
    assert!(stdout.contains("md5 or sha1"));
    Ok(())
}

#[test]
fn test_missing_mode_fails() -> Result<()> {
    let output = run_siv(&["-D", "/tmp"])?;
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("exactly one mode"));
    Ok(())
}

#[test]
fn test_conflicting_modes_fail() -> Result<()> {
    let output = run_siv(&["-i", "-v"])?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn test_initialize_writes_snapshot_and_report() -> Result<()> {
    let fx = Fixture::new();
    fs::write(fx.root().join("a.txt"), "hi")?;
    fs::create_dir(fx.root().join("sub"))?;

    let output = run_siv_owned(&fx.init_args())?;
    assert!(
        output.status.success(),
        "siv -i failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Initialization complete!"));

    let snapshot = fs::read_to_string(&fx.verification_file)?;
    let lines: Vec<&str> = snapshot.lines().collect();
    assert_eq!(lines[0], "SIV Verification File");
    assert!(lines[1].starts_with("Directory: "));
    assert_eq!(lines[2], "Hash Function: md5");
    assert!(lines[3].starts_with("File Name\t"));
    assert_eq!(lines.len(), 6); // header + one file + one directory

    let report = fs::read_to_string(&fx.report_file)?;
    assert!(report.contains("SIV Report File"));
    assert!(report.contains("Number of Parsed Files: 1"));
    assert!(report.contains("Number of Parsed Directories: 1"));
    assert!(report.contains("Time of Initialization (in seconds):"));
    Ok(())
}

#[test]
fn test_verify_clean_tree() -> Result<()> {
    let fx = Fixture::new();
    fs::write(fx.root().join("a.txt"), "hi")?;
    run_siv_owned(&fx.init_args())?;

    let output = run_siv_owned(&fx.verify_args())?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Verification complete!"));
    assert!(stdout.contains("No changes detected"));

    let report = fs::read_to_string(&fx.report_file)?;
    assert!(report.contains("Number of Changed Files: 0"));
    assert!(report.ends_with("Warnings:\n"));
    Ok(())
}

#[test]
fn test_verify_ignores_directory_and_hash_flags() -> Result<()> {
    let fx = Fixture::new();
    fs::write(fx.root().join("a.txt"), "hi")?;
    run_siv_owned(&fx.init_args())?;

    // -D and -H are accepted but ignored; both come from the snapshot header
    let mut args = fx.verify_args();
    args.extend([
        "-D".to_string(),
        "/nonexistent".to_string(),
        "-H".to_string(),
        "sha1".to_string(),
    ]);
    let output = run_siv_owned(&args)?;
    assert!(
        output.status.success(),
        "siv -v failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Verification complete!"));

    let report = fs::read_to_string(&fx.report_file)?;
    assert!(report.contains("Hash Function: md5"));
    assert!(report.contains("Number of Changed Files: 0"));
    Ok(())
}

#[test]
fn test_verify_reports_drift() -> Result<()> {
    let fx = Fixture::new();
    fs::write(fx.root().join("a.txt"), "hi")?;
    run_siv_owned(&fx.init_args())?;

    fs::write(fx.root().join("a.txt"), "hi!")?;
    fs::write(fx.root().join("b.txt"), "new")?;

    let output = run_siv_owned(&fx.verify_args())?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total:"));

    let report = fs::read_to_string(&fx.report_file)?;
    assert!(report.contains("Number of New Files: 1"));
    assert!(report.contains("Number of Changed Files: 1"));
    assert!(report.contains("is new"));
    assert!(report.contains("is changed:"));
    assert!(report.contains("hash "));
    Ok(())
}

#[test]
fn test_initialize_requires_all_flags() -> Result<()> {
    let fx = Fixture::new();
    let output = run_siv(&[
        "-i",
        "-D",
        &fx.root().display().to_string(),
        "-V",
        &fx.verification_file.display().to_string(),
        "-R",
        &fx.report_file.display().to_string(),
    ])?;
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hash function"));
    Ok(())
}

#[test]
fn test_initialize_rejects_unknown_hash_function() -> Result<()> {
    let fx = Fixture::new();
    let mut args = fx.init_args();
    *args.last_mut().unwrap() = "sha256".to_string();

    let output = run_siv_owned(&args)?;
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("valid hash function"));
    assert!(!fx.verification_file.exists());
    Ok(())
}

#[test]
fn test_initialize_rejects_relative_paths() -> Result<()> {
    let fx = Fixture::new();
    let output = run_siv(&[
        "-i",
        "-D",
        "relative/dir",
        "-V",
        &fx.verification_file.display().to_string(),
        "-R",
        &fx.report_file.display().to_string(),
        "-H",
        "md5",
    ])?;
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("absolute path"));
    Ok(())
}

#[test]
fn test_initialize_rejects_outputs_inside_monitored_directory() -> Result<()> {
    let fx = Fixture::new();
    let inside = fx.root().join("verification");
    let output = run_siv(&[
        "-i",
        "-D",
        &fx.root().display().to_string(),
        "-V",
        &inside.display().to_string(),
        "-R",
        &fx.report_file.display().to_string(),
        "-H",
        "md5",
    ])?;
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("inside the monitored directory"));
    assert!(!inside.exists());
    Ok(())
}

#[test]
fn test_initialize_rejects_non_txt_report() -> Result<()> {
    let fx = Fixture::new();
    let mut args = fx.init_args();
    args[6] = fx._out.path().join("report.log").display().to_string();

    let output = run_siv_owned(&args)?;
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(".txt"));
    Ok(())
}

#[test]
fn test_verify_missing_verification_file_fails() -> Result<()> {
    let fx = Fixture::new();
    let output = run_siv_owned(&fx.verify_args())?;
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("verification file"));
    assert!(!fx.report_file.exists());
    Ok(())
}
