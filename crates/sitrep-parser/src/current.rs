//! Current-sprint detection.
//!
//! The page carries no explicit "current" flag, so detection is a strategy.
//! [`ArrowProximity`] is the default: an arrow marker placed shortly before a
//! mention of the sprint marks it as current.

use regex::Regex;
use sitrep_core::entities::Sprint;

use crate::rules::ParserRules;

/// Decides whether a sprint is the current one.
pub trait CurrentSprintStrategy: Send + Sync {
    /// `text` is the cleaned text of the whole page.
    fn is_current(&self, text: &str, sprint: &Sprint) -> bool;
}

/// A configured marker (`:arrow_right:`) starting within `window` characters
/// before any `Sprint <n>` mention.
#[derive(Debug, Clone)]
pub struct ArrowProximity {
    markers: Vec<String>,
    window: usize,
}

impl ArrowProximity {
    #[must_use]
    pub const fn new(markers: Vec<String>, window: usize) -> Self {
        Self { markers, window }
    }

    #[must_use]
    pub fn from_rules(rules: &ParserRules) -> Self {
        Self::new(rules.current_markers.clone(), rules.proximity_window)
    }

    /// Character offsets of every rendered marker token in `text`.
    fn marker_offsets(&self, text: &str) -> Vec<usize> {
        let mut offsets: Vec<usize> = self
            .markers
            .iter()
            .flat_map(|marker| {
                let token = format!(":{marker}:");
                text.match_indices(&token)
                    .map(|(byte, _)| char_offset(text, byte))
                    .collect::<Vec<_>>()
            })
            .collect();
        offsets.sort_unstable();
        offsets
    }
}

impl CurrentSprintStrategy for ArrowProximity {
    fn is_current(&self, text: &str, sprint: &Sprint) -> bool {
        let markers = self.marker_offsets(text);
        if markers.is_empty() {
            return false;
        }
        let Ok(mention) = Regex::new(&format!(r"\bSprint\s+{}\b", sprint.number)) else {
            return false;
        };

        mention.find_iter(text).any(|m| {
            let at = char_offset(text, m.start());
            markers
                .iter()
                .any(|&marker| marker < at && at - marker <= self.window)
        })
    }
}

fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}
