//! Epics from the execution-plan table.
//!
//! Column layout of an epic row:
//!
//! | index | content                                   |
//! |-------|-------------------------------------------|
//! | 1     | parent initiative key macro (optional)    |
//! | 2     | size token and epic key macro             |
//! | 3..10 | sprint columns, one may carry `SP-<n>`    |
//! | 10    | team status label                         |
//! | 11    | milestone notes                           |

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use sitrep_core::entities::{Epic, browse_url};
use tracing::debug;

use super::{RowShape, find_key, status_titles};
use crate::markup;
use crate::rules::ParserRules;
use crate::table::{self, Row};

/// At least three cells; the epic key lives in the third.
pub const EPIC_ROW: RowShape = RowShape {
    min_cells: 3,
    key_cell: 2,
};

const INITIATIVE_CELL: usize = 1;
const SPRINT_CELLS: std::ops::RangeInclusive<usize> = 3..=10;
const TEAM_CELL: usize = 10;
const MILESTONES_CELL: usize = 11;

static SPRINT_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSP-(\d+)\b").expect("sprint ref pattern is valid"));

#[must_use]
pub fn extract_epics(section: &str, rules: &ParserRules) -> Vec<Epic> {
    let mut seen = HashSet::new();
    let mut epics = Vec::new();

    for row in table::rows(section) {
        if !EPIC_ROW.accepts(&row) {
            continue;
        }
        let Some(key_cell) = row.cell(EPIC_ROW.key_cell) else {
            continue;
        };
        let key_macros = markup::scan_macros(key_cell);
        let Some(key) = find_key(&key_macros, rules, &rules.epic_key) else {
            debug!("skipping execution-plan row without an epic key");
            continue;
        };
        if !seen.insert(key.to_string()) {
            debug!(key, "duplicate epic row ignored");
            continue;
        }

        let initiative_key = row.cell(INITIATIVE_CELL).and_then(|cell| {
            find_key(&markup::scan_macros(cell), rules, &rules.initiative_key).map(str::to_string)
        });

        epics.push(Epic {
            external_key: key.to_string(),
            initiative_key,
            title: String::new(),
            status: String::new(),
            size: leading_size(&markup::clean_text(key_cell), rules),
            sprint_ref: sprint_ref(&row),
            team: row.cell(TEAM_CELL).and_then(|cell| {
                status_titles(&markup::scan_macros(cell), rules)
                    .first()
                    .map(|title| (*title).to_string())
            }),
            milestones: row
                .cell(MILESTONES_CELL)
                .map(markup::clean_text)
                .filter(|text| !text.is_empty()),
            url: browse_url(&rules.browse_base_url, key),
        });
    }

    epics
}

/// The leading token of the key cell when it is a configured size.
fn leading_size(text: &str, rules: &ParserRules) -> String {
    text.split_whitespace()
        .next()
        .filter(|token| rules.sizes.iter().any(|size| size == token))
        .map(str::to_string)
        .unwrap_or_default()
}

/// First `SP-<n>` across the sprint columns, upper-cased.
fn sprint_ref(row: &Row<'_>) -> Option<String> {
    SPRINT_CELLS
        .filter_map(|index| row.cell(index))
        .find_map(|cell| {
            let text = markup::clean_text(cell);
            SPRINT_REF_RE
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .map(|digits| format!("SP-{}", digits.as_str()))
        })
}
