//! Verification mode: diff a directory tree against its snapshot

use anyhow::Result;
use owo_colors::OwoColorize;
use siv_core::VerifyOptions;

pub fn run(opts: VerifyOptions) -> Result<()> {
    let summary = siv_core::verify(&opts)?;

    println!("{}", "Verification complete!".green().bold());
    println!("Report file: {}", summary.report_file.display());

    let total = summary.deleted + summary.new + summary.changed;
    if total == 0 {
        println!("{}", "No changes detected".dimmed());
    } else {
        println!(
            "{}",
            format!(
                "Total: {} deleted, {} new, {} changed",
                summary.deleted.to_string().red(),
                summary.new.to_string().green(),
                summary.changed.to_string().yellow()
            )
            .dimmed()
        );
    }

    Ok(())
}
