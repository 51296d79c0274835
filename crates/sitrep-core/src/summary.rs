//! Compact overview of a report: current sprint, counts, open items.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Sprint;
use crate::report::SituationReport;

const CLOSED_RISK_STATUSES: &[&str] = &["Done"];
const CLOSED_BUG_STATUSES: &[&str] = &["Done", "Closed"];

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Summary {
    pub page_title: String,
    pub page_version: u64,
    pub parsed_at: DateTime<Utc>,
    /// The flagged current sprint, else the highest-numbered one.
    pub current_sprint: Option<Sprint>,
    pub sprints: usize,
    pub initiatives: usize,
    pub epics: usize,
    pub risks: usize,
    pub bugs: usize,
    pub open_risks: usize,
    pub open_bugs: usize,
    pub initiatives_by_team: BTreeMap<String, usize>,
}

impl Summary {
    #[must_use]
    pub fn from_report(report: &SituationReport) -> Self {
        let current_sprint = report
            .sprints
            .iter()
            .find(|s| s.is_current)
            .or_else(|| report.sprints.iter().max_by_key(|s| s.number))
            .cloned();

        let mut initiatives_by_team = BTreeMap::new();
        for initiative in &report.initiatives {
            *initiatives_by_team
                .entry(initiative.team.clone())
                .or_insert(0) += 1;
        }

        Self {
            page_title: report.page.title.clone(),
            page_version: report.page.version,
            parsed_at: report.parsed_at,
            current_sprint,
            sprints: report.sprints.len(),
            initiatives: report.initiatives.len(),
            epics: report.epics.len(),
            risks: report.risks.len(),
            bugs: report.bugs.len(),
            open_risks: report
                .risks
                .iter()
                .filter(|r| !is_closed(&r.status, CLOSED_RISK_STATUSES))
                .count(),
            open_bugs: report
                .bugs
                .iter()
                .filter(|b| !is_closed(&b.status, CLOSED_BUG_STATUSES))
                .count(),
            initiatives_by_team,
        }
    }
}

fn is_closed(status: &str, closed: &[&str]) -> bool {
    closed.iter().any(|c| c.eq_ignore_ascii_case(status))
}
