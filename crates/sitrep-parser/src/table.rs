//! Table rows and cells as raw markup fragments.

use std::sync::LazyLock;

use regex::Regex;

static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("row pattern is valid"));

static CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<t([dh])\b[^>]*>(.*?)</t[dh]\s*>").expect("cell pattern is valid")
});

/// One table row: its full inner markup and its cells, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub markup: &'a str,
    pub cells: Vec<&'a str>,
}

impl<'a> Row<'a> {
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&'a str> {
        self.cells.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Rows of every table in `fragment`. Column counts are not validated.
#[must_use]
pub fn rows(fragment: &str) -> Vec<Row<'_>> {
    ROW_RE
        .captures_iter(fragment)
        .filter_map(|caps| caps.get(1))
        .map(|inner| {
            let markup = inner.as_str();
            let cells = CELL_RE
                .captures_iter(markup)
                .filter_map(|caps| caps.get(2))
                .map(|cell| cell.as_str())
                .collect();
            Row { markup, cells }
        })
        .collect()
}
