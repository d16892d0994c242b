//! Command-line configuration and its resolution

use chrono::{DateTime, Local};
use clap::Args;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Extensions checked when `--filetypes` is not given
pub const DEFAULT_FILETYPES: &str = "jpg,jpeg,tif,tiff,png";

/// Prefix of the auto-generated log file name
pub const LOG_FILE_PREFIX: &str = "validate_file_integrity_";

/// Options accepted on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct ScanOptions {
    /// Root directory to start search for images
    #[arg(short = 'd', long = "rootDir", value_parser = parse_path)]
    pub root_dir: Option<PathBuf>,

    /// Comma separated list of filetypes to verify
    #[arg(short = 't', long = "filetypes", default_value = DEFAULT_FILETYPES)]
    pub filetypes: String,

    /// Path to save logfile (default: timestamped file in the working directory)
    #[arg(long = "logfile-path", value_parser = parse_path)]
    pub logfile_path: Option<PathBuf>,

    /// Path to file containing files to check, one per line
    #[arg(short = 'f', long = "filelist-path", value_parser = parse_path)]
    pub filelist_path: Option<PathBuf>,
}

/// Where candidate paths come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    /// Newline-delimited list of paths
    FileList(PathBuf),
    /// Recursive walk of a directory
    Directory(PathBuf),
}

/// Set of accepted extensions, each stored with its leading `.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet(BTreeSet<String>);

impl ExtensionSet {
    /// Parse a comma separated list such as `jpg,.png`
    pub fn parse(list: &str) -> Self {
        let set = list
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                if token.starts_with('.') {
                    token.to_string()
                } else {
                    format!(".{token}")
                }
            })
            .collect();
        Self(set)
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.0.contains(ext)
    }

    /// Whether the final component of `path` ends in an accepted extension.
    ///
    /// Matching is case-sensitive: `.PNG` is not `.png`.
    pub fn matches(&self, path: &Path) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.0.contains(&format!(".{ext}")),
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub source: CandidateSource,
    pub extensions: ExtensionSet,
}

impl ScanOptions {
    /// Log destination, generating a timestamped name when none was given
    pub fn log_path(&self, now: DateTime<Local>) -> PathBuf {
        match non_empty(&self.logfile_path) {
            Some(path) => path.to_path_buf(),
            None => default_log_path(now),
        }
    }

    /// Resolve the candidate source and extension set.
    ///
    /// A file list wins over a root directory when both are present.
    pub fn resolve(&self) -> Result<ScanConfig, ConfigError> {
        let source = if let Some(list) = non_empty(&self.filelist_path) {
            CandidateSource::FileList(list.to_path_buf())
        } else if let Some(root) = non_empty(&self.root_dir) {
            CandidateSource::Directory(root.to_path_buf())
        } else {
            return Err(ConfigError::NoSource);
        };

        Ok(ScanConfig {
            source,
            extensions: ExtensionSet::parse(&self.filetypes),
        })
    }
}

/// `validate_file_integrity_<YYYYMMDD_HHMMSS>.log`
pub fn default_log_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "{}{}.log",
        LOG_FILE_PREFIX,
        now.format("%Y%m%d_%H%M%S")
    ))
}

// Unlike clap's stock path parser this accepts "", which then counts as unset
fn parse_path(value: &str) -> Result<PathBuf, Infallible> {
    Ok(PathBuf::from(value))
}

fn non_empty(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn options() -> ScanOptions {
        ScanOptions {
            filetypes: DEFAULT_FILETYPES.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_extensions_get_leading_dot() {
        let set = ExtensionSet::parse("png,.jpg, tif ,,");
        let exts: Vec<_> = set.iter().collect();
        assert_eq!(exts, vec![".jpg", ".png", ".tif"]);
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let set = ExtensionSet::parse("png");
        assert!(set.matches(Path::new("/data/a.png")));
        assert!(!set.matches(Path::new("/data/a.PNG")));
        assert!(!set.matches(Path::new("/data/png")));
        assert!(!set.matches(Path::new("/data/a.png.bak")));
    }

    #[test]
    fn test_resolve_requires_a_source() {
        let err = options().resolve().unwrap_err();
        assert!(matches!(err, ConfigError::NoSource));

        let mut opts = options();
        opts.filelist_path = Some(PathBuf::new());
        opts.root_dir = Some(PathBuf::new());
        assert!(matches!(opts.resolve(), Err(ConfigError::NoSource)));
    }

    #[test]
    fn test_file_list_takes_priority() {
        let mut opts = options();
        opts.root_dir = Some(PathBuf::from("/images"));
        opts.filelist_path = Some(PathBuf::from("files.txt"));

        let config = opts.resolve().unwrap();
        assert_eq!(config.source, CandidateSource::FileList(PathBuf::from("files.txt")));
    }

    #[test]
    fn test_directory_source() {
        let mut opts = options();
        opts.root_dir = Some(PathBuf::from("/images"));

        let config = opts.resolve().unwrap();
        assert_eq!(config.source, CandidateSource::Directory(PathBuf::from("/images")));
        assert_eq!(config.extensions.len(), 5);
    }

    #[test]
    fn test_log_path_default_is_timestamped() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let opts = options();
        assert_eq!(
            opts.log_path(now),
            PathBuf::from("validate_file_integrity_20240309_070501.log")
        );

        let mut opts = options();
        opts.logfile_path = Some(PathBuf::new());
        assert_eq!(opts.log_path(now), default_log_path(now));

        opts.logfile_path = Some(PathBuf::from("/var/log/check.log"));
        assert_eq!(opts.log_path(now), PathBuf::from("/var/log/check.log"));
    }
}
