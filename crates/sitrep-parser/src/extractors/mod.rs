//! Entity extractors for the static page sections.
//!
//! Each extractor owns its row shape. They share the key and status-label
//! helpers below but are otherwise independent.

pub mod epic;
pub mod initiative;
pub mod sprint;

pub use epic::{EPIC_ROW, extract_epics};
pub use initiative::{INITIATIVE_ROW, extract_initiatives};
pub use sprint::extract_sprints;

use regex::Regex;

use crate::markup::Macro;
use crate::rules::ParserRules;
use crate::table::Row;

/// Team recorded when a row names none.
pub const UNKNOWN_TEAM: &str = "UNKNOWN";

/// Row validity rule: minimum cell count and the cell carrying the key macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowShape {
    pub min_cells: usize,
    pub key_cell: usize,
}

impl RowShape {
    #[must_use]
    pub fn accepts(&self, row: &Row<'_>) -> bool {
        row.cells.len() >= self.min_cells && row.cells.len() > self.key_cell
    }
}

/// First issue-key macro whose key matches `pattern`.
pub(crate) fn find_key<'m>(
    macros: &'m [Macro],
    rules: &ParserRules,
    pattern: &Regex,
) -> Option<&'m str> {
    macros
        .iter()
        .filter(|m| m.is(&rules.markup.issue_macro))
        .filter_map(|m| m.param(&rules.markup.key_param))
        .map(str::trim)
        .find(|key| pattern.is_match(key))
}

/// Titles of the status-label macros, in document order.
pub(crate) fn status_titles<'m>(macros: &'m [Macro], rules: &ParserRules) -> Vec<&'m str> {
    macros
        .iter()
        .filter(|m| m.is(&rules.markup.status_macro))
        .filter_map(|m| m.param(&rules.markup.title_param))
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .collect()
}
