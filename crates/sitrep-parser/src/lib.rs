//! # sitrep-parser
//!
//! Extraction of planning records from a Confluence storage-format page.
//!
//! The page is scanned in layers:
//! - [`markup`]: structured macros, emoticon markers, cleaned text
//! - [`section`]: anchor-delimited sections
//! - [`table`]: rows and cells of the section tables
//! - [`extractors`]: initiatives, epics, sprints
//! - [`dynamic`]: the query-backed risk and bug sections
//!
//! Extraction never fails. Rows that do not fit their shape are skipped and
//! sections that cannot be found are reported as warnings.

pub mod current;
pub mod dynamic;
pub mod error;
pub mod extractors;
pub mod markup;
pub mod rules;
pub mod section;
pub mod table;

pub use current::{ArrowProximity, CurrentSprintStrategy};
pub use dynamic::{BugSection, QueryBackedSection, RiskSection, SectionQuery};
pub use error::ParserError;
pub use rules::ParserRules;

use sitrep_config::{SectionAnchors, SitrepConfig};
use sitrep_core::Warning;
use sitrep_core::entities::{Epic, Initiative, Sprint};
use tracing::{debug, warn};

/// Everything the page itself yields, before enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    pub sprints: Vec<Sprint>,
    pub initiatives: Vec<Initiative>,
    pub epics: Vec<Epic>,
    pub risk_query: Option<String>,
    pub bug_query: Option<String>,
    pub warnings: Vec<Warning>,
}

/// Page parser: compiled rules plus the current-sprint strategy.
pub struct SituationParser {
    rules: ParserRules,
    current: Box<dyn CurrentSprintStrategy>,
}

impl SituationParser {
    #[must_use]
    pub fn new(rules: ParserRules) -> Self {
        let current = Box::new(ArrowProximity::from_rules(&rules));
        Self { rules, current }
    }

    /// Compile rules from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::InvalidPattern`] for an invalid key pattern.
    pub fn from_config(config: &SitrepConfig) -> Result<Self, ParserError> {
        Ok(Self::new(ParserRules::from_config(config)?))
    }

    /// Replace the current-sprint strategy.
    #[must_use]
    pub fn with_current_strategy(mut self, strategy: impl CurrentSprintStrategy + 'static) -> Self {
        self.current = Box::new(strategy);
        self
    }

    #[must_use]
    pub const fn rules(&self) -> &ParserRules {
        &self.rules
    }

    /// Extract sprints, initiatives, epics and the stored risk/bug queries.
    ///
    /// Deterministic for a given document and configuration.
    #[must_use]
    pub fn parse(&self, document: &str) -> ParsedPage {
        let mut warnings = Vec::new();
        let rules = &self.rules;

        let sprints =
            extractors::extract_sprints(&markup::clean_text(document), self.current.as_ref());

        let initiatives =
            locate_or_warn(document, "priorities", &rules.sections.priorities, &mut warnings)
                .map(|body| extractors::extract_initiatives(body, rules))
                .unwrap_or_default();

        let execution_plan = &rules.sections.execution_plan;
        let epics = locate_or_warn(document, "execution_plan", execution_plan, &mut warnings)
            .map(|body| extractors::extract_epics(body, rules))
            .unwrap_or_default();

        let risk_query = self.query::<RiskSection>(document, &mut warnings);
        let bug_query = self.query::<BugSection>(document, &mut warnings);

        debug!(
            sprints = sprints.len(),
            initiatives = initiatives.len(),
            epics = epics.len(),
            "page parsed"
        );

        ParsedPage {
            sprints,
            initiatives,
            epics,
            risk_query,
            bug_query,
            warnings,
        }
    }

    fn query<S: QueryBackedSection>(
        &self,
        document: &str,
        warnings: &mut Vec<Warning>,
    ) -> Option<String> {
        let resolved = S::resolve_query(document, &self.rules);
        match &resolved {
            SectionQuery::Found(_) => {}
            SectionQuery::Absent => {
                warn!(section = S::NAME, "section has no stored query");
                warnings.push(Warning::missing_query(S::NAME));
            }
            SectionQuery::MissingSection => {
                warn!(section = S::NAME, "section not found");
                warnings.push(Warning::missing_section(S::NAME));
            }
        }
        resolved.into_query()
    }
}

fn locate_or_warn<'a>(
    document: &'a str,
    name: &str,
    anchors: &SectionAnchors,
    warnings: &mut Vec<Warning>,
) -> Option<&'a str> {
    let body = section::locate(document, anchors);
    if body.is_none() {
        warn!(section = name, start = %anchors.start, end = %anchors.end, "section not found");
        warnings.push(Warning::missing_section(name));
    }
    body
}

impl std::fmt::Debug for SituationParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SituationParser")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
