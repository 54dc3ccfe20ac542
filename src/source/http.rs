//! HTTP feed transport.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;

use super::{FeedDocument, FeedTransport};

/// User-Agent string for feed and catalog requests.
const USER_AGENT: &str = concat!("firehose/", env!("CARGO_PKG_VERSION"));

/// Fetches feeds (and the catalog document) over HTTP with a blocking client.
///
/// One client is shared by every fetch thread; [`Client`] is internally
/// reference counted and safe to use concurrently.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// GET `url` and return the response body.  Non-2xx responses are errors.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(transport_error)?;
        let body = response.bytes().map_err(transport_error)?;
        Ok(body.to_vec())
    }
}

impl FeedTransport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<FeedDocument> {
        let body = self.get_bytes(url)?;
        FeedDocument::parse(&body)
    }
}

/// reqwest reports an elapsed deadline as "operation timed out", which alone
/// classifies as a network error.  This prefix makes it a timeout.
const TIMEOUT_PREFIX: &str = "request timeout";

fn transport_error(e: reqwest::Error) -> anyhow::Error {
    if e.is_timeout() {
        anyhow!("{TIMEOUT_PREFIX}: {e}")
    } else {
        anyhow::Error::new(e)
    }
}
