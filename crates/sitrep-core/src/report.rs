//! The assembled result of one pipeline run.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::entities::{Bug, Epic, Initiative, Risk, Sprint};

/// Identity of the source page a report was parsed from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub version: u64,
    pub last_modified: Option<String>,
}

/// Normalized records extracted from one situation page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SituationReport {
    pub page: PageMeta,
    pub sprints: Vec<Sprint>,
    pub initiatives: Vec<Initiative>,
    pub epics: Vec<Epic>,
    pub risks: Vec<Risk>,
    pub bugs: Vec<Bug>,
    /// Stored query of the risks section, when one was found.
    pub risk_query: Option<String>,
    /// Stored query of the bugs section, when one was found.
    pub bug_query: Option<String>,
    pub diagnostics: Diagnostics,
    pub parsed_at: DateTime<Utc>,
    /// Teams the report was narrowed to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_by: Option<Vec<String>>,
}

impl SituationReport {
    /// Total number of records across the five entity sequences.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.sprints.len()
            + self.initiatives.len()
            + self.epics.len()
            + self.risks.len()
            + self.bugs.len()
    }

    /// Narrow the report to the given teams.
    ///
    /// Initiatives are kept when their team is listed, risks when their title
    /// names a listed team, bugs when either their team or title does. Sprints
    /// and epics are shared across teams and kept as they are. Matching is
    /// case-insensitive. An empty team list leaves the report untouched.
    #[must_use]
    pub fn filter_by_teams(mut self, teams: &[String]) -> Self {
        if teams.is_empty() {
            return self;
        }
        let wanted: Vec<String> = teams.iter().map(|t| t.to_uppercase()).collect();
        let names_team = |text: &str| {
            let upper = text.to_uppercase();
            wanted.iter().any(|t| upper.contains(t.as_str()))
        };

        self.initiatives
            .retain(|i| wanted.contains(&i.team.to_uppercase()));
        self.risks.retain(|r| names_team(&r.title));
        self.bugs
            .retain(|b| wanted.contains(&b.team.to_uppercase()) || names_team(&b.title));
        self.filtered_by = Some(teams.to_vec());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Priority;
    use pretty_assertions::assert_eq;

    fn initiative(key: &str, team: &str) -> Initiative {
        Initiative {
            external_key: key.into(),
            title: String::new(),
            status: String::new(),
            priority: Priority::Medium,
            team: team.into(),
            category: None,
            kickoff_date: None,
            zone_approval: None,
            url: String::new(),
        }
    }

    fn bug(key: &str, team: &str, title: &str) -> Bug {
        Bug {
            external_key: key.into(),
            title: title.into(),
            priority: "High".into(),
            status: "Open".into(),
            team: team.into(),
            url: String::new(),
        }
    }

    fn report() -> SituationReport {
        SituationReport {
            page: PageMeta::default(),
            sprints: Vec::new(),
            initiatives: vec![initiative("I-1", "CATALOG"), initiative("I-2", "PAYMENTS")],
            epics: Vec::new(),
            risks: vec![Risk {
                external_key: "R-1".into(),
                title: "[Catalog] feed delay".into(),
                assignee: String::new(),
                status: "Open".into(),
                priority: "High".into(),
                gut_score: 27,
                url: String::new(),
            }],
            bugs: vec![
                bug("B-1", "UNKNOWN", "CMS preview broken"),
                bug("B-2", "PAYMENTS", "Refund rounding"),
            ],
            risk_query: None,
            bug_query: None,
            diagnostics: Diagnostics::default(),
            parsed_at: Utc::now(),
            filtered_by: None,
        }
    }

    #[test]
    fn filter_keeps_matching_teams() {
        let filtered = report().filter_by_teams(&["catalog".into(), "CMS".into()]);
        let keys: Vec<&str> = filtered
            .initiatives
            .iter()
            .map(|i| i.external_key.as_str())
            .collect();
        assert_eq!(keys, vec!["I-1"]);
        assert_eq!(filtered.risks.len(), 1);
        assert_eq!(filtered.bugs.len(), 1);
        assert_eq!(filtered.bugs[0].external_key, "B-1");
        assert_eq!(
            filtered.filtered_by,
            Some(vec!["catalog".to_string(), "CMS".to_string()])
        );
    }

    #[test]
    fn empty_filter_is_identity() {
        let original = report();
        let filtered = original.clone().filter_by_teams(&[]);
        assert_eq!(filtered, original);
    }

    #[test]
    fn item_count_sums_all_sequences() {
        assert_eq!(report().item_count(), 5);
    }
}
