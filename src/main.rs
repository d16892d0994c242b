use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

use image_integrity_rs::prelude::*;

/// Exit status when neither a file list nor a root directory is given
const EXIT_NO_SOURCE: i32 = -1;

#[derive(Parser)]
#[command(name = "validate_file_integrity")]
#[command(about = "Verify integrity of image files by decoding them", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: ScanOptions,

    /// Verbose output (log every file that decodes cleanly)
    #[arg(short, long)]
    verbose: bool,

    /// Also write a summary report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Report layout
    #[arg(long, value_enum, default_value = "text")]
    report_format: ReportFormat,
}

fn main() {
    let cli = Cli::parse();

    let log_path = cli.options.log_path(Local::now());
    let subscriber = match file_and_console(&log_path, cli.verbose) {
        Ok(subscriber) => subscriber,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    install_panic_hook();
    let code = tracing::subscriber::with_default(subscriber, || execute(&cli));
    process::exit(code);
}

fn execute(cli: &Cli) -> i32 {
    info!(
        "validating integrity of the following image types: {}",
        cli.options.filetypes
    );

    let config = match cli.options.resolve() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return EXIT_NO_SOURCE;
        }
    };

    match scan(cli, &config) {
        Ok(()) => 0,
        Err(e) => {
            error!("{e:#}");
            1
        }
    }
}

fn scan(cli: &Cli, config: &ScanConfig) -> Result<()> {
    let summary = run(config, &ImageCrateDecoder::new()).context("Failed to collect candidate files")?;

    if let Some(ref report) = cli.report {
        write_report(report, &summary, cli.report_format).context("Failed to write report")?;
        info!("Detailed report saved to {}", report.display());
    }

    Ok(())
}
