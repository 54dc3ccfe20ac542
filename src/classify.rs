//! Fetch failure classification.

use std::fmt;

use serde::Serialize;

/// Coarse category of a failed feed fetch, reported in the feed status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Timeout,
    Network,
    Parse,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::Network => "network",
            ErrorKind::Parse => "parse",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TIMEOUT_PHRASES: &[&str] = &["timeout", "deadline exceeded"];
const STATUS_MARKERS: &[&str] = &["404", "403", "500"];
const PARSE_PHRASES: &[&str] = &["parse", "xml", "invalid"];

/// Classify a failure from its message text.
///
/// Substring match, ASCII case-insensitive, checked in order: timeout
/// phrases, HTTP status markers, parse phrases.  Anything else is
/// [`ErrorKind::Network`].
pub fn classify(message: &str) -> ErrorKind {
    let message = message.to_ascii_lowercase();
    let matches = |needles: &[&str]| needles.iter().any(|n| message.contains(n));

    if matches(TIMEOUT_PHRASES) {
        ErrorKind::Timeout
    } else if matches(STATUS_MARKERS) {
        ErrorKind::Network
    } else if matches(PARSE_PHRASES) {
        ErrorKind::Parse
    } else {
        ErrorKind::Network
    }
}
