use crate::conf::types::{LogFormat, LoggingConfig};
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system.
///
/// - `RUST_LOG` wins over the configured level when set
/// - `json` output flattens event fields for cleaner log lines
/// - with `file` set, output goes through a non-blocking file writer; keep the
///   returned guard alive until exit or buffered lines are lost
pub fn init_logging(cfg: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    let format = cfg.format.unwrap_or_else(default_log_format);

    match &cfg.file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path.file_name().unwrap_or(path.as_os_str());
            let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let builder = fmt().with_env_filter(filter).with_writer(writer);
            match format {
                LogFormat::Json => builder.json().flatten_event(true).init(),
                LogFormat::Pretty => builder.with_ansi(false).compact().init(),
            }
            Some(guard)
        }
        None => {
            // Logs go to stderr; stdout carries command output.
            let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
            match format {
                LogFormat::Json => builder.json().flatten_event(true).init(),
                LogFormat::Pretty => builder.compact().init(),
            }
            None
        }
    }
}

pub fn default_log_format() -> LogFormat {
    if io::stderr().is_terminal() {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}
