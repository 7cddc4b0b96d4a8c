//! Log output for the service.
//!
//! Events go to stderr as compact single lines. Request spans come from the
//! router's `TraceLayer`, so span lifecycle events are not emitted on top.

use tracing_subscriber::EnvFilter;

use crate::config::{LogLevel, ServerConfig};

/// Connection-level crates that are only interesting when tracing.
const QUIET_TARGETS: [&str; 2] = ["hyper", "h2"];

fn filter_from_config(config: &ServerConfig) -> EnvFilter {
    let level = config.log_level;
    let directives = if level == LogLevel::Trace {
        level.as_filter_str().to_owned()
    } else {
        QUIET_TARGETS
            .iter()
            .fold(level.as_filter_str().to_owned(), |acc, target| {
                format!("{acc},{target}=warn")
            })
    };
    EnvFilter::new(directives)
}

/// Install the global subscriber for `config.log_level`.
///
/// The CLI `--log-level` flag wins over `FEATUREDOC_LOG_LEVEL`; both are
/// already folded into `config` by the time this runs. Calling it again is a
/// no-op, which lets tests build several routers in one process.
pub fn init_logging(config: &ServerConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .compact()
        .with_target(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        let config = ServerConfig::default();
        init_logging(&config);
        init_logging(&config);
    }

    #[test]
    fn filter_quiets_connection_crates() {
        let config = ServerConfig::default().with_log_level(LogLevel::Debug);
        let filter = filter_from_config(&config).to_string();
        assert!(filter.contains("debug"));
        assert!(filter.contains("hyper=warn"));
        assert!(filter.contains("h2=warn"));
    }

    #[test]
    fn trace_level_keeps_everything() {
        let config = ServerConfig::default().with_log_level(LogLevel::Trace);
        assert_eq!(filter_from_config(&config).to_string(), "trace");
    }
}
