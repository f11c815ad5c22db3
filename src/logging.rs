//! Diagnostics for the harness.
//!
//! Everything goes to stderr through `tracing`; stdout carries transcripts
//! only. The filter directive comes from the `[logging]` table of the
//! embedded catalog rather than from the environment, so two runs of the
//! binary behave the same wherever they are launched.

use tracing_subscriber::EnvFilter;

use crate::catalog::LoggingConfig;
use crate::error::CatalogError;

/// Builds the filter for a configured directive such as `"warn"` or
/// `"design_patterns=debug"`.
pub fn filter_for(config: &LoggingConfig) -> Result<EnvFilter, CatalogError> {
    EnvFilter::try_new(&config.level).map_err(|err| CatalogError::LogDirective {
        directive: config.level.clone(),
        reason: err.to_string(),
    })
}

/// Installs the stderr subscriber. Returns `false` when a global subscriber
/// was already set (tests install it many times).
pub fn setup_tracing(config: &LoggingConfig) -> Result<bool, CatalogError> {
    let filter = filter_for(config)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init()
        .is_ok();
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_configured_levels() {
        for level in ["warn", "debug", "design_patterns=trace"] {
            let config = LoggingConfig {
                level: level.to_string(),
            };
            assert!(filter_for(&config).is_ok(), "rejected {level}");
        }
    }

    #[test]
    fn test_rejects_garbage_directive() {
        let config = LoggingConfig {
            level: "design_patterns=loudest".to_string(),
        };
        let err = filter_for(&config).unwrap_err();
        assert!(matches!(err, CatalogError::LogDirective { .. }));
    }

    #[test]
    fn test_setup_is_idempotent() {
        let config = LoggingConfig::default();
        assert!(setup_tracing(&config).is_ok());
        assert!(!setup_tracing(&config).unwrap());
    }
}
