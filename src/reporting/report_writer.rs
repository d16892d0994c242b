//! Report writing functionality

use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::core::scan::ScanSummary;
use crate::error::{Result, ScanError};

/// Layout of the optional report file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Write scan results to a file
///
/// # Arguments
/// * `output_path` - Path to output file
/// * `summary` - Result of the scan
/// * `format` - Plain text or JSON
pub fn write_report(output_path: &Path, summary: &ScanSummary, format: ReportFormat) -> Result<()> {
    let to_err = |source| ScanError::Report {
        path: output_path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(output_path).map_err(to_err)?);

    match format {
        ReportFormat::Text => write_text(&mut out, summary),
        ReportFormat::Json => serde_json::to_writer_pretty(&mut out, summary)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(out)),
    }
    .and_then(|()| out.flush())
    .map_err(to_err)
}

fn write_text<W: Write>(out: &mut W, summary: &ScanSummary) -> io::Result<()> {
    writeln!(out, "Image Integrity Report")?;
    writeln!(out, "======================")?;
    writeln!(out, "Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;

    writeln!(out, "Summary Statistics:")?;
    writeln!(out, "-------------------")?;
    writeln!(out, "  Total files scanned: {}", summary.scanned)?;
    writeln!(out, "  Valid files: {}", summary.valid_count())?;
    writeln!(out, "  Invalid files: {}", summary.invalid_count())?;
    writeln!(out)?;

    if !summary.invalid.is_empty() {
        writeln!(out, "Invalid Files:")?;
        writeln!(out, "--------------")?;
        for invalid in &summary.invalid {
            writeln!(out, "  {}", invalid.path.display())?;
            writeln!(out, "    {}", invalid.error)?;
        }
    }

    Ok(())
}
