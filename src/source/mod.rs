//! Feed retrieval abstraction layer.
//!
//! This module defines the [`FeedTransport`] trait and the format-neutral
//! [`FeedDocument`] it produces.  The real implementation is
//! [`HttpTransport`]; tests substitute an in-memory one.
//!
//! ## Adding a feed format
//!
//! Write a `FeedDocument::from_<format>` conversion next to the RSS and Atom
//! ones in `parse.rs` and try it from [`FeedDocument::parse`].  Nothing
//! downstream of the transport needs to change.

mod feed_item;
mod http;
mod parse;

pub use feed_item::{FeedDocument, FeedItem};
pub use http::HttpTransport;

use anyhow::Result;

/// Anything that can turn a feed URL into a parsed feed document.
///
/// The aggregator calls [`fetch()`](FeedTransport::fetch) from one thread per
/// source at the same time, so implementations must be [`Send`] and [`Sync`].
pub trait FeedTransport: Send + Sync {
    /// Retrieve and parse the feed at `url`.
    ///
    /// The error's full display text (`{:#}`) is what gets classified and
    /// reported for the source, so it should say what went wrong.
    fn fetch(&self, url: &str) -> Result<FeedDocument>;
}
