use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";

/// Initializes the logging system with both console and file output.
///
/// Console output is human-readable; the daily-rotated file under `logs/`
/// gets JSON lines. `RUST_LOG` overrides the default info-level filter.
pub fn init_logging() {
    let _ = fs::create_dir_all(LOG_DIR);

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, "seatmap_scraper.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("seatmap_scraper=info".parse().unwrap()))
        .with(file_layer)
        .with(console_layer)
        .init();

    // The guard must outlive the process so buffered log lines get flushed
    std::mem::forget(guard);
}
