//! Initialization mode: snapshot a directory tree

use anyhow::Result;
use owo_colors::OwoColorize;
use siv_core::InitOptions;

pub fn run(opts: InitOptions) -> Result<()> {
    let summary = siv_core::initialize(&opts)?;

    println!("{}", "Initialization complete!".green().bold());
    println!("Verification file: {}", summary.verification_file.display());
    println!("Report file: {}", summary.report_file.display());
    println!(
        "{}",
        format!(
            "Parsed {} files and {} directories in {}s",
            summary.files_parsed, summary.dirs_parsed, summary.elapsed_secs
        )
        .dimmed()
    );

    Ok(())
}
