//! The parsed feed shape shared by every feed format.
//!
//! RSS channels and Atom feeds are both converted into a [`FeedDocument`]
//! so the fetcher never needs to know which format a source served.

use chrono::{DateTime, Utc};

/// A parsed feed: its title and items, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedDocument {
    pub title: Option<String>,
    pub items: Vec<FeedItem>,
}

/// A single feed entry, normalised from RSS or Atom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    /// Globally unique id supplied by the feed (RSS `<guid>`, Atom `<id>`).
    pub guid: Option<String>,

    pub title: Option<String>,

    pub link: Option<String>,

    /// Publication timestamp; `None` when absent or unparseable.
    pub published: Option<DateTime<Utc>>,

    /// Full body (RSS `content:encoded`, Atom `<content>`).
    pub content: Option<String>,

    /// Short text (RSS `<description>`, Atom `<summary>`).
    pub summary: Option<String>,
}
