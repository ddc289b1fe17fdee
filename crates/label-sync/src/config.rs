//! Configuration for the label reconciliation service.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Which inference strategy resolves a project to its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverMode {
    /// Numeric-range derivation from the project identifier.
    #[default]
    Static,
    /// Lookup table keyed by project name, loaded from a file.
    Mapping,
}

/// Label-sync configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Linear API token; absence is startup-fatal.
    pub api_token: Option<String>,
    /// GraphQL endpoint (override for self-hosted proxies or tests).
    pub api_url: Option<String>,
    /// Active inference strategy.
    pub mode: ResolverMode,
    /// Mapping document path (mapping mode only).
    pub mapping_path: Option<PathBuf>,
    /// Retry budget for every network operation.
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = RetryPolicy::default();
        Self {
            api_token: env::var("LINEAR_API_TOKEN").ok().filter(|s| !s.is_empty()),
            api_url: env::var("LINEAR_API_URL").ok().filter(|s| !s.is_empty()),
            mode: match env::var("LABEL_SYNC_MODE").as_deref() {
                Ok("mapping") => ResolverMode::Mapping,
                _ => ResolverMode::Static,
            },
            mapping_path: env::var("LABEL_SYNC_MAPPING_PATH").ok().map(PathBuf::from),
            retry: RetryPolicy {
                attempts: env::var("LABEL_SYNC_RETRY_ATTEMPTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.attempts),
                delay: env::var("LABEL_SYNC_RETRY_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .map_or(defaults.delay, Duration::from_millis),
            },
        }
    }
}
