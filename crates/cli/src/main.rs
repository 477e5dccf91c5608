//! SIV CLI - siv command

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use siv_core::{HashAlgorithm, InitOptions, VerifyOptions};
use std::path::PathBuf;

mod cmd;

/// System integrity verifier
///
/// Short flags follow the original siv interface; clap's built-in help flag
/// is disabled so `-h` is a mode of its own.
#[derive(Parser)]
#[command(name = "siv", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Start siv in initialization mode
    #[arg(short = 'i')]
    initialize: bool,

    /// Start siv in verification mode
    #[arg(short = 'v')]
    verify: bool,

    /// Print the help message
    #[arg(short = 'h')]
    help: bool,

    /// Path to the directory to be monitored
    #[arg(short = 'D', value_name = "monitored_directory")]
    directory: Option<PathBuf>,

    /// Path to the verification file
    #[arg(short = 'V', value_name = "verification_file")]
    verification_file: Option<PathBuf>,

    /// Path to the report file
    #[arg(short = 'R', value_name = "report_file")]
    report_file: Option<PathBuf>,

    /// Hash function to be used (initialization mode only)
    #[arg(short = 'H', value_name = "hash_function")]
    hash_function: Option<String>,
}

fn main() {
    // Logs go to stderr; stdout is the CLI contract surface
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        // Every failure surfaces identically: one line on stdout, non-zero exit
        println!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::try_parse()
        .map_err(|_| anyhow!("Invalid command line argument. Consult -h for more info"))?;

    let selected = [cli.initialize, cli.verify, cli.help]
        .iter()
        .filter(|flag| **flag)
        .count();
    if selected != 1 {
        bail!("Please specify exactly one mode (-i, -v or -h). Consult -h for more info");
    }

    if cli.help {
        cmd::help::run();
        return Ok(());
    }

    let verification_file = require_absolute(
        require(cli.verification_file, "a verification file")?,
        "verification file",
    )?;
    let report_file =
        require_absolute(require(cli.report_file, "a report file")?, "report file")?;

    if cli.initialize {
        let directory =
            require_absolute(require(cli.directory, "a directory")?, "monitored directory")?;
        let algorithm: HashAlgorithm = require(cli.hash_function, "a hash function")?
            .parse()
            .map_err(|_| anyhow!("Please specify a valid hash function. Consult -h for more info"))?;

        cmd::init::run(InitOptions {
            directory,
            verification_file,
            report_file,
            algorithm,
        })
    } else {
        // Verification mode: the monitored directory and hash function come
        // from the verification file header; -D and -H are ignored
        cmd::verify::run(VerifyOptions {
            verification_file,
            report_file,
        })
    }
}

fn require<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| anyhow!("Please specify {what}. Consult -h for more info"))
}

fn require_absolute(path: PathBuf, what: &str) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        bail!("The {what} has to be an absolute path")
    }
}
