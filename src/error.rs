//! Error types for the integrity checker

use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the command-line configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("At least one of --filelist-path or --rootDir must be supplied. Exiting")]
    NoSource,
}

/// Fatal problems outside the per-file decode loop
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("could not read file list {path:?}: {source}")]
    FileList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write report {path:?}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single candidate file failed to decode.
///
/// These never abort a scan; each one marks its file as invalid.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("decoder panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Other(String),
}

/// Result type with default ScanError
pub type Result<T, E = ScanError> = std::result::Result<T, E>;
