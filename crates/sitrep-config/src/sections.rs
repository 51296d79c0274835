//! Anchor pairs delimiting the page sections.

use serde::{Deserialize, Serialize};

/// Text that opens and closes a section in the raw markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SectionAnchors {
    pub start: String,
    pub end: String,
}

impl SectionAnchors {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() || self.end.is_empty()
    }
}

fn default_priorities() -> SectionAnchors {
    SectionAnchors::new("PRIORITIES", "EXECUTION PLAN")
}

fn default_execution_plan() -> SectionAnchors {
    SectionAnchors::new("EXECUTION PLAN", "RISKS/BLOCKERS")
}

// Query-backed sections are also bounded by the next heading, so their end
// anchor only needs to close a page layout section.
fn default_risks() -> SectionAnchors {
    SectionAnchors::new("RISKS/BLOCKERS", "</ac:layout-section>")
}

fn default_bugs() -> SectionAnchors {
    SectionAnchors::new("BUGS", "</ac:layout-section>")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionsConfig {
    #[serde(default = "default_priorities")]
    pub priorities: SectionAnchors,

    #[serde(default = "default_execution_plan")]
    pub execution_plan: SectionAnchors,

    #[serde(default = "default_risks")]
    pub risks: SectionAnchors,

    #[serde(default = "default_bugs")]
    pub bugs: SectionAnchors,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            priorities: default_priorities(),
            execution_plan: default_execution_plan(),
            risks: default_risks(),
            bugs: default_bugs(),
        }
    }
}

impl SectionsConfig {
    /// All anchor pairs with their section names.
    pub fn named(&self) -> [(&'static str, &SectionAnchors); 4] {
        [
            ("priorities", &self.priorities),
            ("execution_plan", &self.execution_plan),
            ("risks", &self.risks),
            ("bugs", &self.bugs),
        ]
    }
}
