//! Image Integrity Library
//!
//! Finds image files that fail to decode, which usually means they were
//! corrupted in transfer or storage.

pub mod core;
pub mod error;
pub mod reporting;
pub mod scanner;

pub use crate::core::{config, scan, validator};
pub use reporting::{logger, report_writer};
pub use scanner::file_scanner;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::config::{CandidateSource, ExtensionSet, ScanConfig, ScanOptions};
    pub use crate::core::scan::{run, scan_candidates, InvalidFile, ScanSummary};
    pub use crate::core::validator::{isolate_panics, Decode, ImageCrateDecoder};
    pub use crate::error::{ConfigError, DecodeError, ScanError};
    pub use crate::reporting::{
        build_subscriber, file_and_console, install_panic_hook, write_report, ReportFormat,
    };
    pub use crate::scanner::file_scanner::{
        collect_candidates, collect_from_directory, collect_from_file_list,
    };
}
