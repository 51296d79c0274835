//! Initiatives from the priorities table.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use sitrep_core::entities::{Initiative, browse_url};
use sitrep_core::enums::Priority;
use tracing::debug;

use super::{RowShape, UNKNOWN_TEAM, find_key, status_titles};
use crate::markup::{self, Macro};
use crate::rules::ParserRules;
use crate::table;

/// At least one cell; the initiative key lives in the first.
pub const INITIATIVE_ROW: RowShape = RowShape {
    min_cells: 1,
    key_cell: 0,
};

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").expect("category pattern is valid"));

/// Initiatives in table order, one per key (first occurrence wins).
///
/// `title` and `status` stay empty; enrichment fills them.
#[must_use]
pub fn extract_initiatives(section: &str, rules: &ParserRules) -> Vec<Initiative> {
    let mut seen = HashSet::new();
    let mut initiatives = Vec::new();

    for row in table::rows(section) {
        if !INITIATIVE_ROW.accepts(&row) {
            continue;
        }
        let Some(key_cell) = row.cell(INITIATIVE_ROW.key_cell) else {
            continue;
        };
        let cell_macros = markup::scan_macros(key_cell);
        let Some(key) = find_key(&cell_macros, rules, &rules.initiative_key) else {
            debug!("skipping priorities row without an initiative key");
            continue;
        };
        if !seen.insert(key.to_string()) {
            debug!(key, "duplicate initiative row ignored");
            continue;
        }

        let row_macros = markup::scan_macros(row.markup);
        initiatives.push(Initiative {
            external_key: key.to_string(),
            title: String::new(),
            status: String::new(),
            priority: row_priority(row.markup, rules),
            team: row_team(&row_macros, rules),
            category: trailing_category(key_cell, &cell_macros),
            kickoff_date: None,
            zone_approval: None,
            url: browse_url(&rules.browse_base_url, key),
        });
    }

    initiatives
}

/// The first status label naming a configured team, else the first label.
fn row_team(macros: &[Macro], rules: &ParserRules) -> String {
    let titles = status_titles(macros, rules);
    titles
        .iter()
        .find(|title| rules.is_team(title))
        .or_else(|| titles.first())
        .map_or_else(|| UNKNOWN_TEAM.to_string(), |title| (*title).to_string())
}

/// Priority of the first marker (document order) found in the marker table.
fn row_priority(row_markup: &str, rules: &ParserRules) -> Priority {
    markup::scan_markers(row_markup)
        .iter()
        .find_map(|marker| {
            rules
                .priority_for(&marker.name)
                .or_else(|| marker.shortname.as_deref().and_then(|s| rules.priority_for(s)))
        })
        .unwrap_or_default()
}

/// Text of the first `[...]` after the cell's last macro.
fn trailing_category(cell: &str, macros: &[Macro]) -> Option<String> {
    let tail_start = macros.iter().map(|m| m.span.end).max().unwrap_or(0);
    let tail = markup::clean_text(&cell[tail_start..]);
    CATEGORY_RE
        .captures(&tail)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|category| !category.is_empty())
}
