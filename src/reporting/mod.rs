//! Log output and optional report files

pub mod logger;
pub mod report_writer;

pub use logger::{build_subscriber, file_and_console, install_panic_hook, LineFormat, LOGGER_NAME};
pub use report_writer::{write_report, ReportFormat};
