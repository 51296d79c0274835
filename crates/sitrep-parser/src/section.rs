//! Section location by anchor pairs.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use sitrep_config::SectionAnchors;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h[1-6][\s>]").expect("valid heading regex"));

/// The markup strictly between the first `start` anchor and the first `end`
/// anchor after it.
///
/// Matching is case-sensitive first; when that finds nothing the same search
/// runs case-insensitively.
#[must_use]
pub fn locate<'a>(document: &'a str, anchors: &SectionAnchors) -> Option<&'a str> {
    if anchors.is_empty() {
        return None;
    }
    locate_exact(document, anchors).or_else(|| locate_ignore_case(document, anchors))
}

/// Every candidate body following a `start` anchor, in document order.
///
/// A body runs to the nearest of the `end` anchor or the next heading tag,
/// and to the end of the document when neither follows. Start occurrences
/// are matched case-insensitively only when none match exactly.
#[must_use]
pub fn locate_all<'a>(document: &'a str, anchors: &SectionAnchors) -> Vec<&'a str> {
    if anchors.is_empty() {
        return Vec::new();
    }
    let mut starts: Vec<usize> = document
        .match_indices(anchors.start.as_str())
        .map(|(at, _)| at + anchors.start.len())
        .collect();
    if starts.is_empty() {
        if let Some(start_re) = ignore_case(&anchors.start) {
            starts = start_re.find_iter(document).map(|m| m.end()).collect();
        }
    }
    let end_re = ignore_case(&anchors.end);

    starts
        .into_iter()
        .map(|start| {
            let rest = &document[start..];
            let end = rest
                .find(anchors.end.as_str())
                .or_else(|| end_re.as_ref().and_then(|re| re.find(rest)).map(|m| m.start()));
            let heading = HEADING_RE.find(rest).map(|m| m.start());
            let len = end.into_iter().chain(heading).min().unwrap_or(rest.len());
            &rest[..len]
        })
        .collect()
}

fn ignore_case(literal: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(literal))
        .case_insensitive(true)
        .build()
        .ok()
}

fn locate_exact<'a>(document: &'a str, anchors: &SectionAnchors) -> Option<&'a str> {
    let start = document.find(&anchors.start)? + anchors.start.len();
    let len = document[start..].find(&anchors.end)?;
    Some(&document[start..start + len])
}

fn locate_ignore_case<'a>(document: &'a str, anchors: &SectionAnchors) -> Option<&'a str> {
    let start_re = ignore_case(&anchors.start)?;
    let end_re = ignore_case(&anchors.end)?;

    let start = start_re.find(document)?.end();
    let end = end_re.find_at(document, start)?.start();
    Some(&document[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("<h1>PRIORITIES</h1>body<h1>EXECUTION PLAN</h1>", Some("</h1>body<h1>"))]
    #[case("<h1>Priorities</h1>body<h1>Execution Plan</h1>", Some("</h1>body<h1>"))]
    #[case("<h1>PRIORITIES</h1>body", None)]
    #[case("body<h1>EXECUTION PLAN</h1>", None)]
    #[case("EXECUTION PLAN before PRIORITIES", None)]
    fn locates_between_anchors(#[case] document: &str, #[case] expected: Option<&str>) {
        let anchors = SectionAnchors::new("PRIORITIES", "EXECUTION PLAN");
        assert_eq!(locate(document, &anchors), expected);
    }

    #[test]
    fn exact_match_wins_over_case_insensitive() {
        let document = "Bugs old BUGS new </ac:structured-macro>";
        let anchors = SectionAnchors::new("BUGS", "</ac:structured-macro>");
        assert_eq!(locate(document, &anchors), Some(" new "));
    }

    #[test]
    fn end_is_searched_after_start() {
        let document = "</ac:structured-macro> RISKS/BLOCKERS x </ac:structured-macro>";
        let anchors = SectionAnchors::new("RISKS/BLOCKERS", "</ac:structured-macro>");
        assert_eq!(locate(document, &anchors), Some(" x "));
    }

    #[test]
    fn every_start_occurrence_is_a_candidate() {
        let document = "<p>Reduce BUGS</p><h2>BUGS</h2>query<h2>NOTES</h2>tail";
        let anchors = SectionAnchors::new("BUGS", "</ac:layout-section>");
        assert_eq!(
            locate_all(document, &anchors),
            vec!["</p>", "</h2>query"]
        );
    }

    #[test]
    fn candidate_without_bound_runs_to_document_end() {
        let document = "<h2>Bugs</h2><ac:structured-macro>a</ac:structured-macro>";
        let anchors = SectionAnchors::new("BUGS", "</ac:layout-section>");
        assert_eq!(
            locate_all(document, &anchors),
            vec!["</h2><ac:structured-macro>a</ac:structured-macro>"]
        );
    }

    #[test]
    fn candidate_stops_at_end_anchor_before_heading() {
        let document = "RISKS/BLOCKERS body</ac:layout-section><h2>BUGS</h2>";
        let anchors = SectionAnchors::new("RISKS/BLOCKERS", "</ac:layout-section>");
        assert_eq!(locate_all(document, &anchors), vec![" body"]);
        assert!(locate_all("no anchors here", &anchors).is_empty());
    }

    #[test]
    fn anchors_with_regex_metacharacters_are_literal() {
        let document = "risks/blockers (a+b) </AC:STRUCTURED-MACRO>";
        let anchors = SectionAnchors::new("RISKS/BLOCKERS", "</ac:structured-macro>");
        assert_eq!(locate(document, &anchors), Some(" (a+b) "));
    }
}
