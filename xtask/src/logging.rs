//! Console logger for xtask diagnostics.
//!
//! Implements `log::Log` and writes `[level] message` lines to stderr, the same
//! bracketed tags the task output uses. Operator-facing output (command lines,
//! captured tool output, banners) is printed directly and never filtered.

use log::{Level, LevelFilter, Metadata, Record};

/// Overrides `[log] level` from `xtask.toml`.
pub const LOG_ENV: &str = "XTASK_LOG";

static LOGGER: ConsoleLogger = ConsoleLogger;

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Only our own crate; dependencies are not interesting here.
        if !record.target().starts_with("eae_xtask") && !record.target().starts_with("xtask") {
            return;
        }
        eprintln!("[{}] {}", tag(record.level()), record.args());
    }

    fn flush(&self) {}
}

fn tag(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

/// Install the logger. Later calls only adjust the level.
pub fn init(max_level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(max_level);
}

/// `XTASK_LOG` wins over the configured level; unparsable values fall through.
pub fn resolve_level(env_value: Option<&str>, configured: &str) -> LevelFilter {
    env_value
        .and_then(|v| v.trim().parse().ok())
        .or_else(|| configured.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}
