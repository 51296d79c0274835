//! Sync pipeline: fetch → extract → look up → query → diagnose.
//!
//! Every stage runs in order on the caller's task. Only the page fetch can
//! fail the run; tracker failures become warnings and the affected entities
//! stay unenriched.

use std::collections::HashMap;

use chrono::Utc;
use sitrep_client::{ClientError, DocumentSource, IssueTracker};
use sitrep_core::entities::{Epic, Initiative};
use sitrep_core::tracker::IssueSummary;
use sitrep_core::{Diagnostics, SituationReport, Warning};
use sitrep_parser::{BugSection, QueryBackedSection, RiskSection, SituationParser};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("situation page unavailable: {0}")]
    UpstreamUnavailable(#[source] ClientError),
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Run the tracker stages.
    pub enrich: bool,
    pub batch_size: usize,
    pub max_results: usize,
}

pub struct Pipeline<'a> {
    parser: &'a SituationParser,
    source: &'a dyn DocumentSource,
    tracker: Option<&'a dyn IssueTracker>,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        parser: &'a SituationParser,
        source: &'a dyn DocumentSource,
        tracker: Option<&'a dyn IssueTracker>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            parser,
            source,
            tracker,
            options,
        }
    }

    pub async fn run(&self) -> Result<SituationReport, PipelineError> {
        let document = self
            .source
            .fetch()
            .await
            .map_err(PipelineError::UpstreamUnavailable)?;
        info!(title = %document.title, version = document.version, "page fetched");

        let parsed = self.parser.parse(&document.body);
        info!(
            sprints = parsed.sprints.len(),
            initiatives = parsed.initiatives.len(),
            epics = parsed.epics.len(),
            "page extracted"
        );

        let mut report = SituationReport {
            page: document.meta(),
            sprints: parsed.sprints,
            initiatives: parsed.initiatives,
            epics: parsed.epics,
            risks: Vec::new(),
            bugs: Vec::new(),
            risk_query: parsed.risk_query,
            bug_query: parsed.bug_query,
            diagnostics: Diagnostics {
                warnings: parsed.warnings,
                ..Diagnostics::default()
            },
            parsed_at: Utc::now(),
            filtered_by: None,
        };

        if self.options.enrich {
            match self.tracker {
                Some(tracker) => self.enrich(tracker, &mut report).await,
                None => {
                    warn!("no issue tracker configured; skipping enrichment");
                    report
                        .diagnostics
                        .warnings
                        .push(Warning::enrichment_unavailable("tracker", "not configured"));
                }
            }
        }

        report.diagnostics.initiatives_titled =
            report.initiatives.iter().filter(|i| !i.title.is_empty()).count();
        report.diagnostics.epics_titled = report.epics.iter().filter(|e| !e.title.is_empty()).count();
        Ok(report)
    }

    async fn enrich(&self, tracker: &dyn IssueTracker, report: &mut SituationReport) {
        let keys: Vec<String> = report
            .initiatives
            .iter()
            .map(|i| i.external_key.clone())
            .chain(report.epics.iter().map(|e| e.external_key.clone()))
            .collect();

        if !keys.is_empty() {
            let lookup = tracker.batch_lookup(&keys, self.options.batch_size).await;
            merge_lookup(&mut report.initiatives, &mut report.epics, &lookup.issues);
            report.diagnostics.failed_lookup_chunks = lookup.failed_chunks;
            if lookup.failed_chunks > 0 {
                report.diagnostics.warnings.push(Warning::enrichment_unavailable(
                    "lookup",
                    format!("{} chunk(s) failed", lookup.failed_chunks),
                ));
            }
            info!(
                keys = keys.len(),
                found = lookup.issues.len(),
                failed_chunks = lookup.failed_chunks,
                "lookup merged"
            );
        }

        let rules = self.parser.rules();
        if let Some(query) = report.risk_query.as_deref() {
            let rows = self
                .query_rows::<RiskSection>(tracker, query, &mut report.diagnostics)
                .await;
            report.risks = RiskSection::build(&rows, rules);
        }
        if let Some(query) = report.bug_query.as_deref() {
            let rows = self
                .query_rows::<BugSection>(tracker, query, &mut report.diagnostics)
                .await;
            report.bugs = BugSection::build(&rows, rules);
        }
    }

    async fn query_rows<S: QueryBackedSection>(
        &self,
        tracker: &dyn IssueTracker,
        query: &str,
        diagnostics: &mut Diagnostics,
    ) -> Vec<sitrep_core::tracker::TrackerRow> {
        let fields = S::fields(self.parser.rules());
        match tracker.search(query, &fields, self.options.max_results).await {
            Ok(rows) => {
                info!(section = S::NAME, rows = rows.len(), "stored query executed");
                rows
            }
            Err(error) => {
                warn!(section = S::NAME, %error, "stored query failed");
                diagnostics
                    .warnings
                    .push(Warning::enrichment_unavailable(S::NAME, &error));
                Vec::new()
            }
        }
    }
}

/// Overwrite `title` and `status` for looked-up keys. Page-derived fields
/// are left alone.
pub fn merge_lookup(
    initiatives: &mut [Initiative],
    epics: &mut [Epic],
    issues: &HashMap<String, IssueSummary>,
) {
    for initiative in initiatives {
        if let Some(issue) = issues.get(&initiative.external_key) {
            initiative.title.clone_from(&issue.title);
            initiative.status.clone_from(&issue.status);
        }
    }
    for epic in epics {
        if let Some(issue) = issues.get(&epic.external_key) {
            epic.title.clone_from(&issue.title);
            epic.status.clone_from(&issue.status);
        }
    }
}
