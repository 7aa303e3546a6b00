//! Logging setup for the `shodhan` binary.
//!
//! Command output owns stdout, so log lines go to stderr. The filter comes
//! from `RUST_LOG` when set, otherwise from `log_level` in the config
//! (`SHODHAN_LOG_LEVEL` or the config file, `warn` by default).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Pick the log filter: non-empty `RUST_LOG` wins over the configured level.
///
/// Directives that do not parse fall through to the next source, ending at `warn`.
pub fn log_filter(rust_log: Option<&str>, log_level: &str) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(log_level).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Install the global subscriber, as text or as JSON lines.
pub fn init_tracing(log_level: &str, log_json: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(rust_log.as_deref(), log_level);
    let stderr = fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry.with(stderr.json()).init();
    } else {
        registry.with(stderr).init();
    }
}
