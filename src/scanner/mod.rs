//! Candidate file enumeration

pub mod file_scanner;

pub use file_scanner::{collect_candidates, collect_from_directory, collect_from_file_list};
