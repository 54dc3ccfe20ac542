//! firehose: one newest-first stream of project releases.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌────────────┐  CatalogIndex  ┌──────────────┐  SourceReport  ┌───────────────┐
//! │ catalog.rs │ ─────────────► │  fetch.rs    │ ─────────────► │ aggregate.rs  │
//! │  (once)    │  (shared ref)  │ (per source) │   (channel)    │ (sort, count) │
//! └────────────┘                └──────────────┘                └───────────────┘
//!                                      │                                │
//!                                      ▼                                ▼
//!                               ┌────────────┐                   ┌───────────┐
//!                               │  source/   │                   │ output.rs │
//!                               │ (RSS/Atom) │                   │  (JSON)   │
//!                               └────────────┘                   └───────────┘
//! ```
//!
//! * **`ident`** derives the `org/repo` key shared by feeds and catalog items.
//! * **`catalog`** flattens the landscape YAML into a lookup table.
//! * **`source/`** holds the [`FeedTransport`](source::FeedTransport) trait,
//!   the HTTP implementation, and RSS/Atom decoding.
//! * **`fetch`** fetches one feed, enriches it, and never fails.
//! * **`classify`** buckets fetch failures into timeout/network/parse.
//! * **`aggregate`** runs every fetch concurrently and merges the results.
//! * **`config`** and **`output`** are the file formats at either end.

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod entry;
pub mod error;
pub mod fetch;
pub mod ident;
pub mod output;
pub mod source;

pub use aggregate::{fetch_all, AggregateResult};
pub use catalog::{CatalogEntry, CatalogIndex};
pub use classify::{classify, ErrorKind};
pub use config::{Category, FeedConfig, FeedSource};
pub use entry::{Entry, FeedState, FeedStatus};
pub use error::{CatalogError, ConfigError};
pub use fetch::{fetch_source, FetchOutcome, SourceReport};
pub use ident::extract_repo_id;
