//! Feed source configuration.
//!
//! The list of feeds lives in a YAML file:
//!
//! ```yaml
//! feeds:
//!   - url: https://github.com/kubernetes/kubernetes/releases.atom
//!     category: graduated
//!   - url: https://github.com/knative/serving/releases.atom
//!     category: graduated
//!     project: Knative
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Maturity level a feed is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Graduated,
    Incubating,
    Sandbox,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Graduated => "graduated",
            Category::Incubating => "incubating",
            Category::Sandbox => "sandbox",
        })
    }
}

/// One feed to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedSource {
    pub url: String,
    pub category: Category,
    /// Overrides the project name attached to this feed's entries.
    #[serde(default)]
    pub project: Option<String>,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, category: Category) -> Self {
        Self {
            url: url.into(),
            category,
            project: None,
        }
    }
}

/// Top-level shape of the feeds file.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub feeds: Vec<FeedSource>,
}

impl FeedConfig {
    /// Parse and validate a feeds document.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: FeedConfig = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the feeds file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.feeds.is_empty() {
            return Err(ConfigError::Empty);
        }
        for feed in &self.feeds {
            let url = reqwest::Url::parse(&feed.url).map_err(|e| ConfigError::InvalidUrl {
                url: feed.url.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl {
                    url: feed.url.clone(),
                    reason: format!("unsupported scheme {:?}", url.scheme()),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FEEDS: &str = r#"
feeds:
  - url: https://github.com/kubernetes/kubernetes/releases.atom
    category: graduated
  - url: https://github.com/backstage/backstage/releases.atom
    category: incubating
  - url: https://github.com/knative/serving/releases.atom
    category: sandbox
    project: Knative
"#;

    #[test]
    fn parses_feed_list() {
        let config = FeedConfig::from_yaml(FEEDS).unwrap();
        assert_eq!(config.feeds.len(), 3);
        assert_eq!(config.feeds[0].category, Category::Graduated);
        assert_eq!(config.feeds[1].category, Category::Incubating);
        assert!(config.feeds[0].project.is_none());
        assert_eq!(config.feeds[2].project.as_deref(), Some("Knative"));
        assert_eq!(config.feeds[2].category.to_string(), "sandbox");
    }

    #[test]
    fn bundled_feed_list_is_valid() {
        let config = FeedConfig::from_yaml(include_str!("../config/feeds.yaml")).unwrap();
        assert!(config
            .feeds
            .iter()
            .all(|f| f.url.ends_with("/releases.atom")));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let yaml =
            "feeds:\n  - url: https://github.com/a/b/releases.atom\n    category: archived\n";
        assert!(matches!(
            FeedConfig::from_yaml(yaml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let yaml = "feeds:\n  - url: not a url\n    category: sandbox\n";
        assert!(matches!(
            FeedConfig::from_yaml(yaml),
            Err(ConfigError::InvalidUrl { .. })
        ));

        let yaml = "feeds:\n  - url: ftp://github.com/a/b\n    category: sandbox\n";
        assert!(matches!(
            FeedConfig::from_yaml(yaml),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn empty_feed_list_is_rejected() {
        assert!(matches!(
            FeedConfig::from_yaml("feeds: []\n"),
            Err(ConfigError::Empty)
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FEEDS.as_bytes()).unwrap();

        let config = FeedConfig::load(file.path()).unwrap();
        assert_eq!(config.feeds.len(), 3);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FeedConfig::load(&dir.path().join("feeds.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
