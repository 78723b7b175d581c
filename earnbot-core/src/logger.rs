//! Logging initialization: human-readable lines on the console, and an append-only diagnostic
//! file that only receives warnings and errors.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    filter::LevelFilter,
    fmt::format::{Format, Full, FmtSpan, Writer},
    fmt::time::FormatTime,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Local time in `YYYY-MM-DD HH:MM:SS` for human-readable log lines.
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{} ", t)
    }
}

fn event_format() -> Format<Full, ChronoLocal> {
    tracing_subscriber::fmt::format()
        .with_timer(ChronoLocal)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false)
}

/// Initializes the global tracing subscriber.
///
/// Console output is filtered by `RUST_LOG` (default `info`). The log file at `log_file_path`
/// is opened in append mode and only gets `WARN` and `ERROR` lines, in plain text:
/// `YYYY-MM-DD HH:MM:SS LEVEL target: message key=value ...`.
/// The parent directory is created if needed. Load `.env` before calling.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(log_file_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    let file = Arc::new(file);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .event_format(event_format())
        .with_span_events(FmtSpan::NONE)
        .with_filter(env_filter);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .event_format(event_format())
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false)
        .with_filter(LevelFilter::WARN);

    Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
