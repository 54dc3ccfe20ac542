//! RSS and Atom decoding into [`FeedDocument`].
//!
//! GitHub release feeds are Atom; plain RSS 2.0 feeds are accepted too.  The
//! bytes are tried as RSS first and then as Atom.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

use super::{FeedDocument, FeedItem};

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl FeedDocument {
    /// Parse raw feed bytes as RSS 2.0 or Atom 1.0.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let rss_err = match rss::Channel::read_from(bytes) {
            Ok(channel) => return Ok(Self::from_rss(&channel)),
            Err(e) => e,
        };
        match atom_syndication::Feed::read_from(bytes) {
            Ok(feed) => Ok(Self::from_atom(&feed)),
            Err(atom_err) => Err(anyhow!(
                "failed to parse feed as RSS ({rss_err}) or Atom ({atom_err})"
            )),
        }
    }

    /// Convert an already-parsed [`rss::Channel`].
    pub fn from_rss(channel: &rss::Channel) -> Self {
        let items = channel
            .items()
            .iter()
            .map(|item| {
                // Parse RFC-2822 date; gracefully degrade to None on failure.
                let published = item
                    .pub_date()
                    .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                    .map(|dt| dt.with_timezone(&Utc));

                FeedItem {
                    guid: item.guid().and_then(|g| non_empty(g.value())),
                    title: item.title().and_then(non_empty),
                    link: item.link().and_then(non_empty),
                    published,
                    content: item.content().and_then(non_empty),
                    summary: item.description().and_then(non_empty),
                }
            })
            .collect();

        Self {
            title: non_empty(channel.title()),
            items,
        }
    }

    /// Convert an already-parsed [`atom_syndication::Feed`].
    pub fn from_atom(feed: &atom_syndication::Feed) -> Self {
        let items = feed
            .entries()
            .iter()
            .map(|entry| {
                // Prefer the alternate (HTML) link, else whatever comes first.
                let link = entry
                    .links()
                    .iter()
                    .find(|l| l.rel() == "alternate")
                    .or_else(|| entry.links().first())
                    .and_then(|l| non_empty(l.href()));

                let published = entry
                    .published()
                    .copied()
                    .unwrap_or_else(|| *entry.updated())
                    .with_timezone(&Utc);

                FeedItem {
                    guid: non_empty(entry.id()),
                    title: non_empty(&entry.title().value),
                    link,
                    published: Some(published),
                    content: entry.content().and_then(|c| c.value()).and_then(non_empty),
                    summary: entry.summary().and_then(|s| non_empty(&s.value)),
                }
            })
            .collect();

        Self {
            title: non_empty(&feed.title().value),
            items,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
