//! Log output: `<timestamp> - ValidateFileIntegrity - <LEVEL>:<message>`
//!
//! The subscriber is built as a value and installed by the caller with
//! `tracing::subscriber::with_default`, so nothing global is mutated.

use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::panic;
use std::path::Path;
use std::sync::Mutex;
use tracing::{warn, Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

use crate::core::validator::panic_message;
use crate::error::{Result, ScanError};

/// Name written into every log line
pub const LOGGER_NAME: &str = "ValidateFileIntegrity";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Event formatter producing one plain line per event
#[derive(Debug, Clone)]
pub struct LineFormat {
    name: &'static str,
}

impl LineFormat {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for LineFormat {
    fn default() -> Self {
        Self::new(LOGGER_NAME)
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - {}:",
            Local::now().format(TIMESTAMP_FORMAT),
            self.name,
            level_name(event.metadata().level())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        _ => "DEBUG",
    }
}

/// Build a subscriber writing formatted lines to `make_writer`
pub fn build_subscriber<W>(make_writer: W, verbose: bool) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let max_level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_ansi(false)
        .event_format(LineFormat::default())
        .with_writer(make_writer)
        .finish()
}

/// Subscriber that appends to `log_path` and mirrors every line to stderr
pub fn file_and_console(log_path: &Path, verbose: bool) -> Result<impl Subscriber + Send + Sync + 'static> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|source| ScanError::LogFile {
            path: log_path.to_path_buf(),
            source,
        })?;

    Ok(build_subscriber(Mutex::new(file).and(std::io::stderr), verbose))
}

/// Replace the default panic hook with one that logs through `tracing`.
///
/// A decoder panic is already caught and reported per file; this keeps the
/// panic notice itself in the log format and in the log file instead of a
/// bare `thread 'main' panicked` line on stderr.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|loc| loc.to_string())
            .unwrap_or_else(|| "unknown location".to_string());
        warn!("panic at {}: {}", location, panic_message(info.payload()));
    }));
}
