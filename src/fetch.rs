//! Single-source fetching.
//!
//! [`fetch_source`] turns one [`FeedSource`] into exactly one
//! [`SourceReport`].  It never fails: transport and parse errors become a
//! classified [`FetchOutcome::Failure`] so that one broken feed can't take the
//! others down with it.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::catalog::{CatalogEntry, CatalogIndex};
use crate::classify::{classify, ErrorKind};
use crate::config::FeedSource;
use crate::entry::{Entry, FeedState, FeedStatus};
use crate::ident::extract_repo_id;
use crate::source::{FeedDocument, FeedItem, FeedTransport};

/// Result of a single fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { entries: Vec<Entry>, count: usize },
    Failure { kind: ErrorKind, message: String },
}

/// Everything one fetch produced, handed to the aggregator in one piece.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub feed_url: String,
    /// Taken once when the fetch started.
    pub fetched_at: DateTime<Utc>,
    pub duration: Duration,
    pub outcome: FetchOutcome,
}

impl SourceReport {
    /// Split into the entries to merge and the status record to keep.
    pub fn into_parts(self) -> (Vec<Entry>, FeedStatus) {
        let (entries, status, entries_count, error, error_type) = match self.outcome {
            FetchOutcome::Success { entries, count } => {
                (entries, FeedState::Success, Some(count), None, None)
            }
            FetchOutcome::Failure { kind, message } => {
                (Vec::new(), FeedState::Error, None, Some(message), Some(kind))
            }
        };

        let status = FeedStatus {
            feed_url: self.feed_url,
            status,
            entries_count,
            error,
            error_type,
            fetched_at: self.fetched_at,
            duration: self.duration,
        };
        (entries, status)
    }
}

/// Fetch one feed and enrich its entries from the catalog.
#[instrument(skip_all, fields(feed = %source.url, category = %source.category))]
pub fn fetch_source(
    source: &FeedSource,
    catalog: &CatalogIndex,
    transport: &dyn FeedTransport,
) -> SourceReport {
    let fetched_at = Utc::now();
    let started = Instant::now();

    let outcome = match transport.fetch(&source.url) {
        Ok(document) => {
            let entries = build_entries(source, catalog, &document, fetched_at);
            info!(entries = entries.len(), "fetched feed");
            FetchOutcome::Success {
                count: entries.len(),
                entries,
            }
        }
        Err(e) => {
            let message = format!("{e:#}");
            let kind = classify(&message);
            warn!(%kind, error = %message, "failed to fetch feed");
            FetchOutcome::Failure { kind, message }
        }
    };

    SourceReport {
        feed_url: source.url.clone(),
        fetched_at,
        duration: started.elapsed(),
        outcome,
    }
}

/// Project metadata copied onto every entry of one feed.
#[derive(Default)]
struct Enrichment {
    name: Option<String>,
    description: Option<String>,
    status: Option<String>,
    homepage: Option<String>,
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl Enrichment {
    fn new(source: &FeedSource, project: Option<&CatalogEntry>) -> Self {
        let mut enrichment = project.map_or_else(Self::default, |p| Self {
            name: non_empty(&p.name),
            description: non_empty(&p.description),
            status: non_empty(&p.maturity),
            homepage: non_empty(&p.homepage_url),
        });
        if let Some(name) = source.project.as_deref().and_then(non_empty) {
            enrichment.name = Some(name);
        }
        enrichment
    }
}

fn build_entries(
    source: &FeedSource,
    catalog: &CatalogIndex,
    document: &FeedDocument,
    fetched_at: DateTime<Utc>,
) -> Vec<Entry> {
    let repo_id = extract_repo_id(&source.url);
    let project = catalog.get(&repo_id);
    if project.is_none() {
        debug!(%repo_id, "no catalog match");
    }
    let enrichment = Enrichment::new(source, project);

    document
        .items
        .iter()
        .map(|item| build_entry(source, document, item, &enrichment, fetched_at))
        .collect()
}

fn build_entry(
    source: &FeedSource,
    document: &FeedDocument,
    item: &FeedItem,
    enrichment: &Enrichment,
    fetched_at: DateTime<Utc>,
) -> Entry {
    let link = item.link.clone().unwrap_or_default();
    // Prefer the feed's unique id, fall back to the link.
    let id = item
        .guid
        .as_deref()
        .filter(|g| !g.is_empty())
        .map_or_else(|| link.clone(), str::to_string);

    Entry {
        id,
        title: item.title.clone().unwrap_or_default(),
        link,
        pub_date: item.published.unwrap_or(fetched_at),
        content: item.content.clone(),
        content_snippet: item.summary.clone(),
        guid: item.guid.clone().filter(|g| !g.is_empty()),
        project_name: enrichment.name.clone(),
        project_description: enrichment.description.clone(),
        project_status: enrichment.status.clone(),
        project_homepage: enrichment.homepage.clone(),
        feed_url: source.url.clone(),
        feed_title: document.title.clone(),
        feed_status: FeedState::Success,
        fetched_at,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
