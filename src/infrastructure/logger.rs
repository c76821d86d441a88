use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Subscriber appending plain-text events to `path`. The terminal UI owns
/// stdout, so nothing is printed there.
///
/// `directives` uses `EnvFilter` syntax (`info`, `rangepicker=debug`, ...);
/// an unparsable value falls back to `info`.
pub fn file_subscriber(
    path: &Path,
    directives: &str,
) -> Result<impl Subscriber + Send + Sync + use<>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

    Ok(tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .with_filter(filter),
    ))
}

/// Install the file subscriber globally. `log` records from the rest of the
/// crate are forwarded to it.
pub fn init_file_logging(path: &Path, directives: &str) -> Result<()> {
    file_subscriber(path, directives)?
        .try_init()
        .context("Failed to install logger")?;

    tracing::info!(log_file = %path.display(), "logging initialized");
    Ok(())
}
