//! Sprint headers from the whole page text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use sitrep_core::entities::Sprint;

use crate::current::CurrentSprintStrategy;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Sprint\s+(\d+)\s*:\s*([A-Za-z]+\s+\d{1,2})\s*[-\u{2013}\u{2014}]\s*([A-Za-z]+\s+\d{1,2})")
        .expect("sprint header pattern is valid")
});

static RELEASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Release[:\s]+(\d{1,2}\s+de\s+\w+\.?\s+de\s+\d{4}|[A-Za-z]+\s+\d{1,2})")
        .expect("release pattern is valid")
});

/// Sprints announced in `text` (the page's cleaned text), one per number.
///
/// The release date is taken from the span between a header and the next
/// header; `is_current` is left to `strategy`.
#[must_use]
pub fn extract_sprints(text: &str, strategy: &dyn CurrentSprintStrategy) -> Vec<Sprint> {
    let headers: Vec<_> = HEADER_RE.captures_iter(text).collect();
    let mut seen = HashSet::new();
    let mut sprints = Vec::new();

    for (index, caps) in headers.iter().enumerate() {
        let Some(number) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
            continue;
        };
        if !seen.insert(number) {
            continue;
        }
        let (Some(whole), Some(start), Some(end)) = (caps.get(0), caps.get(2), caps.get(3)) else {
            continue;
        };

        let until = headers
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |next| next.start());
        let release_date = RELEASE_RE
            .captures(&text[whole.end()..until])
            .and_then(|release| release.get(1))
            .map(|date| normalize_spaces(date.as_str()));

        let mut sprint = Sprint {
            name: format!("Sprint {number}"),
            number,
            start_date: normalize_spaces(start.as_str()),
            end_date: normalize_spaces(end.as_str()),
            release_date,
            is_current: false,
        };
        sprint.is_current = strategy.is_current(text, &sprint);
        sprints.push(sprint);
    }

    sprints
}

fn normalize_spaces(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::current::ArrowProximity;
    use pretty_assertions::assert_eq;

    fn arrow() -> ArrowProximity {
        ArrowProximity::new(vec!["arrow_right".into()], 500)
    }

    #[test]
    fn headers_and_release_dates() {
        let text = "Sprint 184: January 12 - January 23 Release: January 28 \
                    Sprint 185: January 26 \u{2013} February 06 Release: 18 de fev. de 2026";
        let sprints = extract_sprints(text, &arrow());
        assert_eq!(sprints.len(), 2);
        assert_eq!(sprints[0].name, "Sprint 184");
        assert_eq!(sprints[0].start_date, "January 12");
        assert_eq!(sprints[0].end_date, "January 23");
        assert_eq!(sprints[0].release_date.as_deref(), Some("January 28"));
        assert_eq!(sprints[1].end_date, "February 06");
        assert_eq!(sprints[1].release_date.as_deref(), Some("18 de fev. de 2026"));
    }

    #[test]
    fn release_is_not_borrowed_from_next_sprint() {
        let text = "Sprint 1: March 1 - March 14 Sprint 2: March 15 - March 28 Release: April 2";
        let sprints = extract_sprints(text, &arrow());
        assert_eq!(sprints[0].release_date, None);
        assert_eq!(sprints[1].release_date.as_deref(), Some("April 2"));
    }

    #[test]
    fn duplicate_numbers_keep_first() {
        let text = "Sprint 7: May 1 - May 14 ... Sprint 7: June 1 - June 14";
        let sprints = extract_sprints(text, &arrow());
        assert_eq!(sprints.len(), 1);
        assert_eq!(sprints[0].start_date, "May 1");
    }

    #[test]
    fn arrow_marks_current_sprint() {
        let text = "Sprint 10: May 1 - May 14 :arrow_right: Sprint 11: May 15 - May 28";
        let sprints = extract_sprints(text, &arrow());
        assert!(!sprints[0].is_current);
        assert!(sprints[1].is_current);
    }

    #[test]
    fn no_headers_no_sprints() {
        assert!(extract_sprints("Sprint planning notes", &arrow()).is_empty());
    }
}
