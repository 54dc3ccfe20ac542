//! Release entries and per-feed status records.
//!
//! These are the two record types of the aggregated dataset.  Their serde
//! shape is the JSON consumed by the site, so field names are camelCase and
//! empty optional fields are left out.

use std::cmp::Ordering;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::ErrorKind;

/// Whether a feed fetch succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedState {
    Success,
    Error,
}

/// A single release announcement, enriched with catalog metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// The feed's unique id, or the link when the feed supplies none.
    pub id: String,
    pub title: String,
    pub link: String,

    /// Publication time; the fetch time when the feed omits it.
    pub pub_date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    /// Catalog maturity tag of the project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_homepage: Option<String>,

    pub feed_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_title: Option<String>,
    pub feed_status: FeedState,
    pub fetched_at: DateTime<Utc>,
}

impl Entry {
    /// Newest first.  Entries with equal timestamps compare equal.
    pub fn newest_first(a: &Entry, b: &Entry) -> Ordering {
        b.pub_date.cmp(&a.pub_date)
    }
}

/// Outcome summary for one feed, as it appears in the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatus {
    pub feed_url: String,
    pub status: FeedState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorKind>,
    pub fetched_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
}

impl FeedStatus {
    pub fn is_success(&self) -> bool {
        self.status == FeedState::Success
    }
}

/// Durations are written the way `Debug` prints them (`1.204s`, `850ms`).
pub(crate) fn serialize_duration<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{duration:?}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
