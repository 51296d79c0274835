//! The issue-tracker seam and the chunked key lookup built on it.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sitrep_config::MAX_BATCH_SIZE;
use sitrep_core::tracker::{IssueSummary, LOOKUP_FIELDS, TrackerRow};
use tracing::{debug, warn};

use crate::error::ClientError;

/// Title/status lookups for a set of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchLookup {
    pub issues: HashMap<String, IssueSummary>,
    /// Chunks whose search failed. Their keys are absent from `issues`.
    pub failed_chunks: usize,
}

/// A tracker that can run a stored query.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Run `query` and return up to `max_results` rows carrying `fields`.
    async fn search(
        &self,
        query: &str,
        fields: &[String],
        max_results: usize,
    ) -> Result<Vec<TrackerRow>, ClientError>;

    /// Look up `keys` with one `key in (...)` search per chunk.
    ///
    /// Chunks hold at most `chunk_size` keys (clamped to `1..=50`). A failing
    /// chunk is logged and counted; the other chunks still run.
    async fn batch_lookup(&self, keys: &[String], chunk_size: usize) -> BatchLookup {
        let mut seen = HashSet::new();
        let keys: Vec<&String> = keys.iter().filter(|k| seen.insert(k.as_str())).collect();
        let chunk_size = chunk_size.clamp(1, MAX_BATCH_SIZE);
        let fields: Vec<String> = LOOKUP_FIELDS.iter().map(|f| (*f).to_string()).collect();

        let mut lookup = BatchLookup::default();
        for (index, chunk) in keys.chunks(chunk_size).enumerate() {
            let query = key_query(chunk);
            match self.search(&query, &fields, chunk.len()).await {
                Ok(rows) => {
                    debug!(chunk = index, keys = chunk.len(), found = rows.len(), "lookup chunk done");
                    for row in &rows {
                        lookup
                            .issues
                            .entry(row.key.clone())
                            .or_insert_with(|| IssueSummary::from(row));
                    }
                }
                Err(error) => {
                    warn!(chunk = index, keys = chunk.len(), %error, "lookup chunk failed");
                    lookup.failed_chunks += 1;
                }
            }
        }
        lookup
    }
}

/// `key in (A-1, A-2)` for a chunk of keys.
#[must_use]
pub fn key_query<S: AsRef<str>>(keys: &[S]) -> String {
    let keys: Vec<&str> = keys.iter().map(AsRef::as_ref).collect();
    format!("key in ({})", keys.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Answers every search with one row per key; fails on chosen calls.
    struct Recorder {
        calls: Mutex<Vec<String>>,
        fail_on: Vec<usize>,
    }

    impl Recorder {
        fn new(fail_on: Vec<usize>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on,
            }
        }
    }

    #[async_trait]
    impl IssueTracker for Recorder {
        async fn search(
            &self,
            query: &str,
            _fields: &[String],
            _max_results: usize,
        ) -> Result<Vec<TrackerRow>, ClientError> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(query.to_string());
                calls.len() - 1
            };
            if self.fail_on.contains(&call) {
                return Err(ClientError::Api {
                    status: 500,
                    message: "boom".into(),
                });
            }
            let inner = query.trim_start_matches("key in (").trim_end_matches(')');
            Ok(inner
                .split(", ")
                .map(|key| TrackerRow {
                    key: key.to_string(),
                    fields: serde_json::json!({ "summary": format!("title of {key}") })
                        .as_object()
                        .cloned()
                        .unwrap_or_default(),
                })
                .collect())
        }
    }

    fn keys(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("BEESCAD-{i}")).collect()
    }

    #[test]
    fn key_query_format() {
        assert_eq!(key_query(&["A-1", "B-2"]), "key in (A-1, B-2)");
    }

    #[tokio::test]
    async fn chunks_never_exceed_size() {
        let tracker = Recorder::new(vec![]);
        let lookup = tracker.batch_lookup(&keys(120), 50).await;
        let calls = tracker.calls.lock().unwrap().clone();
        let sizes: Vec<usize> = calls.iter().map(|q| q.split(", ").count()).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert_eq!(lookup.issues.len(), 120);
        assert_eq!(lookup.failed_chunks, 0);
    }

    #[tokio::test]
    async fn oversized_chunk_is_clamped() {
        let tracker = Recorder::new(vec![]);
        tracker.batch_lookup(&keys(60), 500).await;
        assert_eq!(tracker.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_chunk_keeps_other_results() {
        let tracker = Recorder::new(vec![1]);
        let lookup = tracker.batch_lookup(&keys(5), 2).await;
        assert_eq!(lookup.failed_chunks, 1);
        let mut found: Vec<_> = lookup.issues.keys().cloned().collect();
        found.sort();
        assert_eq!(found, vec!["BEESCAD-1", "BEESCAD-2", "BEESCAD-5"]);
        assert_eq!(lookup.issues["BEESCAD-5"].title, "title of BEESCAD-5");
    }

    #[tokio::test]
    async fn duplicate_and_empty_key_lists() {
        let tracker = Recorder::new(vec![]);
        let lookup = tracker.batch_lookup(&[], 50).await;
        assert!(lookup.issues.is_empty());
        assert!(tracker.calls.lock().unwrap().is_empty());

        let dupes = vec!["A-1".to_string(), "A-1".to_string()];
        tracker.batch_lookup(&dupes, 50).await;
        assert_eq!(tracker.calls.lock().unwrap()[0], "key in (A-1)");
    }
}
