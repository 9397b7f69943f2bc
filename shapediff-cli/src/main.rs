//! shapediff — compare the shape of two configuration trees.
//!
//! # Usage
//!
//! ```text
//! shapediff dirs <left> <right> [--config <file>] [--files <glob>] [--secret-files <glob>] [--json]
//! shapediff files <left> <right> [--sops] [--ignore <path>]... [--json]
//! ```
//!
//! Exit status: 0 when the shapes match, 1 when discrepancies were found,
//! 2 when the comparison itself could not run.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{dirs::DirsArgs, files::FilesArgs, output};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "shapediff",
    version,
    about = "Report structural differences between YAML configuration trees",
    long_about = None,
)]
struct Cli {
    /// Log debug details to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare every file under two directories.
    Dirs(DirsArgs),

    /// Compare a single pair of files.
    Files(FilesArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (result, json) = match cli.command {
        Commands::Dirs(args) => {
            let json = args.output.json;
            (args.run(), json)
        }
        Commands::Files(args) => {
            let json = args.output.json;
            (args.run(), json)
        }
    };

    match result.and_then(|differences| output::report(&differences, json)) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
