//! Decode-and-report loop

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info};

use super::config::ScanConfig;
use super::validator::Decode;
use crate::error::Result;
use crate::scanner::collect_candidates;

/// A candidate that failed to decode
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InvalidFile {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one pass over the candidate list
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ScanSummary {
    /// Number of candidates a decode was attempted on
    pub scanned: usize,
    pub invalid: Vec<InvalidFile>,
}

impl ScanSummary {
    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }

    pub fn valid_count(&self) -> usize {
        self.scanned.saturating_sub(self.invalid.len())
    }
}

/// Try to decode every candidate in order.
///
/// A failure is logged and counted; it never stops the loop.
pub fn scan_candidates<D>(candidates: &[PathBuf], decoder: &D) -> ScanSummary
where
    D: Decode + ?Sized,
{
    let mut summary = ScanSummary::default();

    for path in candidates {
        summary.scanned += 1;
        match decoder.decode(path) {
            Ok(()) => debug!("{} decoded", path.display()),
            Err(e) => {
                error!("Could not open {}. Error was: {}", path.display(), e);
                summary.invalid.push(InvalidFile {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!("Number of invalid files: {}", summary.invalid_count());
    summary
}

/// Enumerate candidates for `config` and scan them
pub fn run<D>(config: &ScanConfig, decoder: &D) -> Result<ScanSummary>
where
    D: Decode + ?Sized,
{
    let candidates = collect_candidates(&config.source, &config.extensions)?;
    info!("Number of candidate files: {}", candidates.len());

    Ok(scan_candidates(&candidates, decoder))
}
