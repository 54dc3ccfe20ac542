//! Error types for the pipeline's fatal failures.
//!
//! Per-feed failures are not errors at this level: they are recorded as
//! [`FetchOutcome::Failure`](crate::fetch::FetchOutcome) values and never
//! propagate.  Only the catalog and the feed configuration can stop a run.

use std::path::PathBuf;

/// The catalog document could not be turned into an index.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Not well-formed YAML, or the top level is not a `landscape:` mapping.
    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// The feed source configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read feed config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse feed config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    #[error("invalid feed url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("feed config lists no feeds")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ConfigError::InvalidUrl {
            url: "not a url".into(),
            reason: "relative URL without a base".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid feed url \"not a url\": relative URL without a base"
        );
        assert_eq!(ConfigError::Empty.to_string(), "feed config lists no feeds");
    }
}
