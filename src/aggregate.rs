//! Parallel feed aggregation.
//!
//! Every source gets its own scoped thread.  Each thread fetches one feed and
//! sends its [`SourceReport`] over an [`mpsc`] channel; the calling thread
//! drains the channel and is the only owner of the merged result, so no lock
//! is needed anywhere.
//!
//! ```text
//! ┌──────────────┐
//! │ fetch_source │──┐
//! └──────────────┘  │ SourceReport  ┌───────────┐  sort  ┌─────────────────┐
//! ┌──────────────┐  ├─────────────► │ collector │ ─────► │ AggregateResult │
//! │ fetch_source │──┤   (channel)   └───────────┘        └─────────────────┘
//! └──────────────┘  │
//!       ...      ───┘
//! ```
//!
//! There is no per-feed timeout here: a hung source delays the whole run
//! until the transport's own request timeout fires.

use std::sync::mpsc;
use std::thread;

use tracing::info;

use crate::catalog::CatalogIndex;
use crate::config::FeedSource;
use crate::entry::{Entry, FeedStatus};
use crate::fetch::{fetch_source, SourceReport};
use crate::source::FeedTransport;

/// Merged output of a run: all entries newest first, one status per source.
#[derive(Debug, Clone, Default)]
pub struct AggregateResult {
    pub entries: Vec<Entry>,
    /// In completion order, which varies between runs.
    pub statuses: Vec<FeedStatus>,
}

impl AggregateResult {
    fn absorb(&mut self, report: SourceReport) {
        let (entries, status) = report.into_parts();
        self.entries.extend(entries);
        self.statuses.push(status);
    }

    pub fn successful(&self) -> usize {
        self.statuses.iter().filter(|s| s.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.statuses.len() - self.successful()
    }

    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Fraction of sources that succeeded; `0.0` when there were none.
    pub fn success_rate(&self) -> f64 {
        if self.statuses.is_empty() {
            return 0.0;
        }
        self.successful() as f64 / self.statuses.len() as f64
    }

    /// Whether strictly more than `min_rate` of the sources succeeded.
    ///
    /// The aggregator never applies this itself; the caller decides what a
    /// healthy run is.
    pub fn meets_threshold(&self, min_rate: f64) -> bool {
        self.success_rate() > min_rate
    }
}

/// Fetch every source concurrently and merge the results.
///
/// Returns once all sources have finished, successfully or not.
pub fn fetch_all(
    sources: &[FeedSource],
    catalog: &CatalogIndex,
    transport: &dyn FeedTransport,
) -> AggregateResult {
    info!(sources = sources.len(), "fetching feeds");

    let mut result = thread::scope(|scope| {
        let (tx, rx) = mpsc::channel();

        for source in sources {
            let tx = tx.clone();
            scope.spawn(move || {
                let report = fetch_source(source, catalog, transport);
                // The receiver outlives every sender inside this scope.
                let _ = tx.send(report);
            });
        }
        // Drop the original sender so the loop below ends with the last thread.
        drop(tx);

        let mut result = AggregateResult::default();
        for report in rx {
            result.absorb(report);
        }
        result
    });

    result.entries.sort_by(Entry::newest_first);

    info!(
        successful = result.successful(),
        failed = result.failed(),
        entries = result.total_entries(),
        "aggregated feeds"
    );
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
