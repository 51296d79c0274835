//! Terminal preferences for table output, decided once at startup.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Narrower terminals are treated as unknown width.
const MIN_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

static PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let prefs = detect(
        flags,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("COLUMNS").ok().as_deref(),
    );
    let _ = PREFS.set(prefs);
}

/// Prefs recorded by [`init`], or plain output when it never ran.
#[must_use]
pub fn prefs() -> UiPrefs {
    PREFS.get().copied().unwrap_or_default()
}

fn detect(flags: &GlobalFlags, tty: bool, no_color: bool, columns: Option<&str>) -> UiPrefs {
    UiPrefs {
        table_color: tty && !no_color && !flags.quiet && flags.format == OutputFormat::Table,
        term_width: columns
            .and_then(|value| value.trim().parse().ok())
            .filter(|width| *width >= MIN_WIDTH),
    }
}
