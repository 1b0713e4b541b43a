use std::io;
use std::path::Path;

use tracing::dispatcher::DefaultGuard;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, registry};

use crate::config::{Config, Logging};
use crate::io::resolve_path;

// Helper struct to store the logger guards. When they are dropped, logging is
// reset and the file writer is flushed.
#[allow(dead_code)]
pub struct LogGuards {
    log_guard: Option<WorkerGuard>,
    default: DefaultGuard,
}

pub fn init_std_out_logging() -> DefaultGuard {
    let collector = registry().with(
        fmt::Layer::new()
            .with_writer(io::stdout)
            .with_filter(LevelFilter::INFO),
    );
    tracing::subscriber::set_default(collector)
}

/// Console logging plus a non blocking JSON log file in the configured
/// output directory, unless logging is turned off in the config.
pub fn init_logging(config: &Config) -> LogGuards {
    let dir = resolve_path(config.context(), &config.output.dir);

    let (log_layer, log_guard) = if Logging::Info == config.output.logging {
        create_file_layer(&dir)
    } else {
        (None, None)
    };

    let console_layer = fmt::layer()
        .with_writer(io::stdout)
        .with_filter(LevelFilter::INFO);

    let collector = registry().with(log_layer).with(console_layer);
    let default = tracing::subscriber::set_default(collector);

    LogGuards { log_guard, default }
}

type FileLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

fn create_file_layer(dir: &Path) -> (Option<FileLayer>, Option<WorkerGuard>) {
    std::fs::create_dir_all(dir)
        .unwrap_or_else(|e| panic!("Could not create log directory {dir:?}: {e}"));
    let log_file_appender = rolling::never(dir, "log.txt");
    let (log_file, log_guard) = non_blocking(log_file_appender);
    let layer = fmt::Layer::new()
        .with_writer(log_file)
        .json()
        .with_ansi(false)
        .with_filter(LevelFilter::INFO)
        .boxed();
    (Some(layer), Some(log_guard))
}
