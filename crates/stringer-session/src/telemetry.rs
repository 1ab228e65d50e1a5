//! Tracing subscriber setup for hosts embedding a session.

use stringer_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "STRINGER_LOG";

const FALLBACK_FILTER: &str = "warn";

/// Filter from `STRINGER_LOG`, else from `logging.filter`, else `warn`.
#[must_use]
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    filter_from(std::env::var(LOG_ENV).ok().as_deref(), config)
}

fn filter_from(env: Option<&str>, config: &LoggingConfig) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(&config.filter).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_FILTER))
}

/// Install a global fmt subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(filter: &str) -> LoggingConfig {
        LoggingConfig {
            filter: filter.to_string(),
        }
    }

    #[test]
    fn env_directives_win() {
        let filter = filter_from(Some("stringer_session=debug"), &logging("info"));
        assert_eq!(filter.to_string(), "stringer_session=debug");
    }

    #[test]
    fn config_used_without_env() {
        assert_eq!(filter_from(None, &logging("info")).to_string(), "info");
    }

    #[test]
    fn unparsable_directives_fall_back() {
        let filter = filter_from(Some("stringer=loud"), &logging("stringer=shouting"));
        assert_eq!(filter.to_string(), "warn");
    }
}
