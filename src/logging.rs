use crate::config::LoggingConfig;
use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber: a daily rolling JSON file under
/// `config.dir` and human-readable lines on stderr.
///
/// Stdout is left to command results. `RUST_LOG` wins over `config.filter`.
pub fn init_logging(config: &LoggingConfig) {
    let _ = fs::create_dir_all(&config.dir);

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&config.dir, &config.file_name));

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    // Flushing stops once the guard drops
    std::mem::forget(guard);
}
