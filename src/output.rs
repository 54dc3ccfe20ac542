//! The output document and run summary.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::AggregateResult;
use crate::entry::{serialize_duration, Entry, FeedStatus};

/// Version of the JSON layout below.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Top-level JSON document written at the end of a run.
#[derive(Debug, Serialize)]
pub struct OutputData {
    pub metadata: Metadata,
    pub releases: Vec<Entry>,
    pub feeds: Vec<FeedStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub schema_version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub generated_by: String,
    #[serde(serialize_with = "serialize_duration")]
    pub build_duration: Duration,
    pub stats: Stats,
    pub performance: Performance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub feeds_total: usize,
    pub feeds_successful: usize,
    pub feeds_failed: usize,
    /// Always zero: every configured feed is attempted.
    pub feeds_skipped: usize,
    pub releases_total: usize,
    pub catalog_projects_total: usize,
    /// Distinct project names attached to at least one release.
    pub catalog_projects_matched: usize,
}

/// Wall-clock time of each pipeline stage.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    #[serde(serialize_with = "serialize_duration")]
    pub catalog_fetch_duration: Duration,
    #[serde(serialize_with = "serialize_duration")]
    pub feeds_fetch_duration: Duration,
}

impl Stats {
    pub fn new(result: &AggregateResult, catalog_projects: usize) -> Self {
        let matched: HashSet<&str> = result
            .entries
            .iter()
            .filter_map(|e| e.project_name.as_deref())
            .filter(|name| !name.is_empty())
            .collect();

        Self {
            feeds_total: result.statuses.len(),
            feeds_successful: result.successful(),
            feeds_failed: result.failed(),
            feeds_skipped: 0,
            releases_total: result.total_entries(),
            catalog_projects_total: catalog_projects,
            catalog_projects_matched: matched.len(),
        }
    }
}

impl OutputData {
    pub fn new(
        result: AggregateResult,
        catalog_projects: usize,
        performance: Performance,
        build_duration: Duration,
    ) -> Self {
        let stats = Stats::new(&result, catalog_projects);
        Self {
            metadata: Metadata {
                schema_version: SCHEMA_VERSION,
                generated_at: Utc::now(),
                generated_by: format!("firehose v{}", env!("CARGO_PKG_VERSION")),
                build_duration,
                stats,
                performance,
            },
            releases: result.entries,
            feeds: result.statuses,
        }
    }

    /// Write the document as pretty-printed JSON, creating parent directories.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("failed to encode output")?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// One-object summary printed to stdout for CI to pick up.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub success: bool,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
    pub feeds_total: usize,
    pub feeds_ok: usize,
    pub feeds_failed: usize,
    pub releases: usize,
}

impl RunSummary {
    pub fn new(stats: &Stats, duration: Duration) -> Self {
        Self {
            success: true,
            duration,
            feeds_total: stats.feeds_total,
            feeds_ok: stats.feeds_successful,
            feeds_failed: stats.feeds_failed,
            releases: stats.releases_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::classify::ErrorKind;
    use crate::entry::tests::make_entry;
    use crate::entry::FeedState;

    fn status(url: &str, ok: bool) -> FeedStatus {
        FeedStatus {
            feed_url: url.to_string(),
            status: if ok { FeedState::Success } else { FeedState::Error },
            entries_count: ok.then_some(1),
            error: (!ok).then(|| "404 Not Found".to_string()),
            error_type: (!ok).then_some(ErrorKind::Network),
            fetched_at: Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            duration: Duration::from_millis(120),
        }
    }

    fn sample_result() -> AggregateResult {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut a = make_entry("a", ts);
        a.project_name = Some("Helm".into());
        let mut b = make_entry("b", ts);
        b.project_name = Some("Helm".into());
        let mut c = make_entry("c", ts);
        c.project_name = Some("Envoy".into());
        let d = make_entry("d", ts);

        AggregateResult {
            entries: vec![a, b, c, d],
            statuses: vec![
                status("https://github.com/helm/helm/releases.atom", true),
                status("https://github.com/envoyproxy/envoy/releases.atom", true),
                status("https://github.com/gone/away/releases.atom", false),
            ],
        }
    }

    #[test]
    fn stats_count_feeds_and_distinct_projects() {
        let stats = Stats::new(&sample_result(), 250);
        assert_eq!(
            stats,
            Stats {
                feeds_total: 3,
                feeds_successful: 2,
                feeds_failed: 1,
                feeds_skipped: 0,
                releases_total: 4,
                catalog_projects_total: 250,
                catalog_projects_matched: 2,
            }
        );
    }

    #[test]
    fn write_json_creates_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("releases.json");

        let output = OutputData::new(
            sample_result(),
            250,
            Performance::default(),
            Duration::from_secs(2),
        );
        output.write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["metadata"]["schemaVersion"], SCHEMA_VERSION);
        assert_eq!(json["metadata"]["buildDuration"], "2s");
        assert_eq!(json["metadata"]["stats"]["feedsTotal"], 3);
        assert_eq!(json["metadata"]["stats"]["catalogProjectsMatched"], 2);
        assert_eq!(json["metadata"]["performance"]["feedsFetchDuration"], "0ns");
        assert_eq!(json["releases"].as_array().unwrap().len(), 4);
        assert_eq!(json["feeds"][2]["errorType"], "network");
        assert!(json["metadata"]["generatedBy"]
            .as_str()
            .unwrap()
            .starts_with("firehose v"));
    }

    #[test]
    fn summary_mirrors_stats() {
        let stats = Stats::new(&sample_result(), 0);
        let summary = RunSummary::new(&stats, Duration::from_millis(1500));
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["duration"], "1.5s");
        assert_eq!(json["feeds_ok"], 2);
        assert_eq!(json["feeds_failed"], 1);
        assert_eq!(json["releases"], 4);
    }
}
