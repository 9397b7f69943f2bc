//! Rendering of discrepancy lists, shared by every subcommand.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use shapediff_core::Discrepancy;

/// Output flags common to all subcommands.
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Emit the discrepancy list as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Print `differences` and return how many there were.
pub fn report(differences: &[Discrepancy], json: bool) -> Result<usize> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(differences).context("failed to serialize discrepancies")?
        );
        return Ok(differences.len());
    }

    if differences.is_empty() {
        println!("{} no structural differences", "✓".green().bold());
        return Ok(0);
    }

    for difference in differences {
        println!("{}", format_line(difference));
    }
    let noun = if differences.len() == 1 { "discrepancy" } else { "discrepancies" };
    println!("{} {} {noun}", "✗".red().bold(), differences.len());
    Ok(differences.len())
}

fn format_line(difference: &Discrepancy) -> String {
    match (&difference.property_path, &difference.file_path) {
        (Some(path), _) => format!("  {}  {}", path.yellow(), difference.message),
        (None, Some(file)) => format!("  {}  {}", file.display().to_string().magenta(), difference.message),
        (None, None) => format!("  {}", difference.message),
    }
}
