//! Query-backed sections: risks and bugs.
//!
//! These sections hold no static rows. Each carries an issue macro whose
//! query parameter is run against the tracker; the rows that come back are
//! mapped into entities here.

use std::collections::HashSet;

use sitrep_config::SectionAnchors;
use sitrep_core::entities::{Bug, Risk, browse_url};
use sitrep_core::tracker::TrackerRow;

use crate::extractors::UNKNOWN_TEAM;
use crate::markup;
use crate::rules::ParserRules;
use crate::section;

/// Result of resolving a section's stored query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionQuery {
    Found(String),
    /// The section exists but holds no query macro.
    Absent,
    /// The section's anchors were not found.
    MissingSection,
}

impl SectionQuery {
    #[must_use]
    pub fn into_query(self) -> Option<String> {
        match self {
            Self::Found(query) => Some(query),
            Self::Absent | Self::MissingSection => None,
        }
    }
}

/// A page section whose entities come from a stored tracker query.
pub trait QueryBackedSection {
    type Entity;

    /// Section name used in warnings and logs.
    const NAME: &'static str;

    fn anchors(rules: &ParserRules) -> &SectionAnchors;

    /// Tracker fields the query must return.
    fn fields(rules: &ParserRules) -> Vec<String>;

    fn entity_from_row(row: &TrackerRow, rules: &ParserRules) -> Self::Entity;

    fn key_of(entity: &Self::Entity) -> &str;

    /// Return the first issue macro's query parameter found after any
    /// occurrence of the section's start anchor.
    ///
    /// Each occurrence is bounded by the end anchor or the next heading, so
    /// a passing mention of the heading text or another macro ahead of the
    /// query does not hide it.
    fn resolve_query(document: &str, rules: &ParserRules) -> SectionQuery {
        let bodies = section::locate_all(document, Self::anchors(rules));
        if bodies.is_empty() {
            return SectionQuery::MissingSection;
        }
        bodies
            .into_iter()
            .flat_map(markup::scan_macros)
            .filter(|m| m.is(&rules.markup.issue_macro))
            .find_map(|m| {
                m.param(&rules.markup.query_param)
                    .filter(|query| !query.is_empty())
                    .map(str::to_string)
            })
            .map_or(SectionQuery::Absent, SectionQuery::Found)
    }

    /// Map tracker rows to entities, one per key (first occurrence wins).
    fn build(rows: &[TrackerRow], rules: &ParserRules) -> Vec<Self::Entity> {
        let mut seen = HashSet::new();
        rows.iter()
            .map(|row| Self::entity_from_row(row, rules))
            .filter(|entity| seen.insert(Self::key_of(entity).to_string()))
            .collect()
    }
}

pub struct RiskSection;

impl QueryBackedSection for RiskSection {
    type Entity = Risk;
    const NAME: &'static str = "risks";

    fn anchors(rules: &ParserRules) -> &SectionAnchors {
        &rules.sections.risks
    }

    fn fields(rules: &ParserRules) -> Vec<String> {
        let mut fields: Vec<String> = ["summary", "status", "priority", "assignee"]
            .into_iter()
            .map(String::from)
            .collect();
        fields.extend(rules.gut_score_field.clone());
        fields
    }

    fn entity_from_row(row: &TrackerRow, rules: &ParserRules) -> Risk {
        #[allow(clippy::cast_possible_truncation)]
        let gut_score = rules
            .gut_score_field
            .as_deref()
            .and_then(|field| row.number(field))
            .filter(|score| score.is_finite())
            .map_or(0, |score| score.round() as i64);

        Risk {
            external_key: row.key.clone(),
            title: row.text("summary").unwrap_or_default().to_string(),
            assignee: row
                .nested("assignee", "displayName")
                .unwrap_or_default()
                .to_string(),
            status: row.nested("status", "name").unwrap_or_default().to_string(),
            priority: row.nested("priority", "name").unwrap_or_default().to_string(),
            gut_score,
            url: browse_url(&rules.browse_base_url, &row.key),
        }
    }

    fn key_of(entity: &Risk) -> &str {
        &entity.external_key
    }
}

pub struct BugSection;

impl QueryBackedSection for BugSection {
    type Entity = Bug;
    const NAME: &'static str = "bugs";

    fn anchors(rules: &ParserRules) -> &SectionAnchors {
        &rules.sections.bugs
    }

    fn fields(rules: &ParserRules) -> Vec<String> {
        let mut fields: Vec<String> = ["summary", "status", "priority", "labels", "components"]
            .into_iter()
            .map(String::from)
            .collect();
        fields.extend(rules.team_field.clone());
        fields
    }

    fn entity_from_row(row: &TrackerRow, rules: &ParserRules) -> Bug {
        Bug {
            external_key: row.key.clone(),
            title: row.text("summary").unwrap_or_default().to_string(),
            priority: row.nested("priority", "name").unwrap_or_default().to_string(),
            status: row.nested("status", "name").unwrap_or_default().to_string(),
            team: bug_team(row, rules),
            url: browse_url(&rules.browse_base_url, &row.key),
        }
    }

    fn key_of(entity: &Bug) -> &str {
        &entity.external_key
    }
}

/// Team field first, then a configured team named in labels, components or
/// the summary.
fn bug_team(row: &TrackerRow, rules: &ParserRules) -> String {
    if let Some(team) = rules
        .team_field
        .as_deref()
        .and_then(|field| row.labels(field).into_iter().next())
        .filter(|team| !team.trim().is_empty())
    {
        return team;
    }

    let mut haystack = row.labels("labels");
    haystack.extend(row.labels("components"));
    haystack.extend(row.text("summary").map(str::to_string));
    let haystack: Vec<String> = haystack.iter().map(|s| s.to_uppercase()).collect();

    rules
        .teams
        .iter()
        .find(|team| {
            let team = team.to_uppercase();
            haystack.iter().any(|text| text.contains(&team))
        })
        .cloned()
        .unwrap_or_else(|| UNKNOWN_TEAM.to_string())
}
