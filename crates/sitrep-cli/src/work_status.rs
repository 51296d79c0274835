//! Compact work-status markdown rendered from a report.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};
use sitrep_core::entities::Epic;
use sitrep_core::{SituationReport, Summary};

const TIMELINE_SPRINTS: usize = 7;
const EPICS_PER_SPRINT: usize = 10;
const LONG_TITLE: usize = 50;
const SHORT_TITLE: usize = 40;
const NO_SPRINT: &str = "No sprint";

/// Render the work-status document. `generated_at` goes in the header.
pub fn render(report: &SituationReport, generated_at: DateTime<Utc>) -> String {
    let summary = Summary::from_report(report);
    let mut md = String::new();

    let _ = writeln!(md, "# Work Status\n");
    let _ = writeln!(md, "> **Updated:** {}", generated_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(
        md,
        "> **Source:** {} (version {})",
        report.page.title, report.page.version
    );
    if let Some(teams) = &report.filtered_by {
        let _ = writeln!(md, "> **Teams:** {}", teams.join(", "));
    }

    let _ = writeln!(md, "\n---\n\n## Current Sprint\n");
    match &summary.current_sprint {
        Some(sprint) => {
            let _ = writeln!(md, "**{}**", sprint.name);
            let _ = writeln!(md, "- Start: {}", sprint.start_date);
            let _ = writeln!(md, "- End: {}", sprint.end_date);
            let _ = writeln!(md, "- Release: {}\n", or_na(sprint.release_date.as_deref()));
        }
        None => md.push_str("No current sprint identified.\n\n"),
    }

    if !report.sprints.is_empty() {
        let mut sprints: Vec<_> = report.sprints.iter().collect();
        sprints.sort_by(|a, b| b.number.cmp(&a.number));
        md.push_str("### Sprint Timeline\n\n| Sprint | Release | Status |\n|---|---|---|\n");
        for sprint in sprints.into_iter().take(TIMELINE_SPRINTS) {
            let _ = writeln!(
                md,
                "| {} | {} | {} |",
                cell(&sprint.name),
                cell(or_na(sprint.release_date.as_deref())),
                if sprint.is_current { "Current" } else { "" }
            );
        }
        md.push('\n');
    }

    let _ = writeln!(md, "---\n\n## Initiatives ({})\n\n### By Team\n", report.initiatives.len());
    for (team, count) in &summary.initiatives_by_team {
        let _ = writeln!(md, "- **{team}:** {count}");
    }
    md.push_str("\n| Key | Title | Status | Team | Priority |\n|---|---|---|---|---|\n");
    let mut initiatives: Vec<_> = report.initiatives.iter().collect();
    initiatives.sort_by(|a, b| (&a.team, &a.external_key).cmp(&(&b.team, &b.external_key)));
    for initiative in initiatives {
        let _ = writeln!(
            md,
            "| {} | {} | {} | {} | {} |",
            initiative.external_key,
            cell(&shorten(&initiative.title, LONG_TITLE)),
            cell(or_na(Some(initiative.status.as_str()))),
            cell(&initiative.team),
            initiative.priority
        );
    }

    let _ = writeln!(md, "\n---\n\n## Epics ({})\n", report.epics.len());
    for (sprint, epics) in epics_by_sprint(&report.epics).iter().rev() {
        let _ = writeln!(md, "### {sprint} ({})\n", epics.len());
        md.push_str("| Key | Title | Status | Size |\n|---|---|---|---|\n");
        for epic in epics.iter().take(EPICS_PER_SPRINT) {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} |",
                epic.external_key,
                cell(&shorten(&epic.title, SHORT_TITLE)),
                cell(or_na(Some(epic.status.as_str()))),
                or_na(Some(epic.size.as_str()))
            );
        }
        if epics.len() > EPICS_PER_SPRINT {
            let _ = writeln!(md, "| ... | *+{} more* | | |", epics.len() - EPICS_PER_SPRINT);
        }
        md.push('\n');
    }

    md.push_str("---\n\n## Alerts\n\n");
    if report.risks.is_empty() {
        md.push_str("No open risks.\n\n");
    } else {
        let mut risks: Vec<_> = report.risks.iter().collect();
        risks.sort_by(|a, b| b.gut_score.cmp(&a.gut_score));
        let _ = writeln!(md, "### Risks ({})\n", risks.len());
        md.push_str("| Key | Title | GUT | Priority |\n|---|---|---|---|\n");
        for risk in risks {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} |",
                risk.external_key,
                cell(&shorten(&risk.title, SHORT_TITLE)),
                risk.gut_score,
                cell(or_na(Some(risk.priority.as_str())))
            );
        }
        md.push('\n');
    }
    if report.bugs.is_empty() {
        md.push_str("No open bugs.\n\n");
    } else {
        let mut bugs: Vec<_> = report.bugs.iter().collect();
        bugs.sort_by(|a, b| (&a.priority, &a.team).cmp(&(&b.priority, &b.team)));
        let _ = writeln!(md, "### Bugs ({})\n", bugs.len());
        md.push_str("| Key | Title | Team | Priority |\n|---|---|---|---|\n");
        for bug in bugs {
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} |",
                bug.external_key,
                cell(&shorten(&bug.title, SHORT_TITLE)),
                cell(&bug.team),
                cell(or_na(Some(bug.priority.as_str())))
            );
        }
        md.push('\n');
    }

    let current = summary.current_sprint.as_ref();
    md.push_str("---\n\n## Quick Reference\n\n| Question | Answer |\n|---|---|\n");
    let _ = writeln!(md, "| Current sprint | {} |", or_na(current.map(|s| s.name.as_str())));
    let _ = writeln!(
        md,
        "| Next release | {} |",
        or_na(current.and_then(|s| s.release_date.as_deref()))
    );
    let _ = writeln!(md, "| Initiatives | {} |", summary.initiatives);
    let _ = writeln!(md, "| Epics | {} |", summary.epics);
    let _ = writeln!(md, "| Open risks | {} |", summary.open_risks);
    let _ = writeln!(md, "| Open bugs | {} |", summary.open_bugs);

    if !report.diagnostics.warnings.is_empty() {
        md.push_str("\n## Warnings\n\n");
        for warning in &report.diagnostics.warnings {
            let _ = writeln!(md, "- {warning}");
        }
    }
    md
}

/// Epics keyed by sprint reference. Epics without one share a group.
fn epics_by_sprint(epics: &[Epic]) -> BTreeMap<&str, Vec<&Epic>> {
    let mut groups: BTreeMap<&str, Vec<&Epic>> = BTreeMap::new();
    for epic in epics {
        groups
            .entry(epic.sprint_ref.as_deref().unwrap_or(NO_SPRINT))
            .or_default()
            .push(epic);
    }
    groups
}

fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => "N/A",
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use sitrep_core::entities::{Initiative, Risk, Sprint};
    use sitrep_core::enums::Priority;
    use sitrep_core::{Diagnostics, PageMeta};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 30, 14, 5, 0).unwrap()
    }

    fn sprint(number: u32, is_current: bool, release: Option<&str>) -> Sprint {
        Sprint {
            name: format!("Sprint {number}"),
            number,
            start_date: "January 26".into(),
            end_date: "February 06".into(),
            release_date: release.map(str::to_string),
            is_current,
        }
    }

    fn epic(key: &str, sprint_ref: Option<&str>) -> Epic {
        Epic {
            external_key: key.into(),
            initiative_key: None,
            title: "Bulk | import".into(),
            status: String::new(),
            size: "M".into(),
            sprint_ref: sprint_ref.map(str::to_string),
            team: None,
            milestones: None,
            url: String::new(),
        }
    }

    fn report() -> SituationReport {
        SituationReport {
            page: PageMeta {
                title: "Situation Wall".into(),
                version: 9,
                last_modified: None,
            },
            sprints: vec![
                sprint(184, false, Some("January 28")),
                sprint(185, true, Some("18 de fev. de 2026")),
            ],
            initiatives: vec![Initiative {
                external_key: "BEESIP-10009".into(),
                title: "A very long initiative title that keeps going past fifty characters".into(),
                status: "In Progress".into(),
                priority: Priority::High,
                team: "CATALOG".into(),
                category: None,
                kickoff_date: None,
                zone_approval: None,
                url: String::new(),
            }],
            epics: vec![
                epic("BEESCAD-501", Some("SP-185")),
                epic("BEESCAD-502", Some("SP-186")),
                epic("BEESCAD-503", None),
            ],
            risks: vec![
                Risk {
                    external_key: "BEESIP-9001".into(),
                    title: "Vendor SLA".into(),
                    assignee: String::new(),
                    status: "Open".into(),
                    priority: "High".into(),
                    gut_score: 8,
                    url: String::new(),
                },
                Risk {
                    external_key: "BEESIP-9002".into(),
                    title: "Feed delay".into(),
                    assignee: String::new(),
                    status: "Done".into(),
                    priority: "Low".into(),
                    gut_score: 64,
                    url: String::new(),
                },
            ],
            bugs: Vec::new(),
            risk_query: None,
            bug_query: None,
            diagnostics: Diagnostics::default(),
            parsed_at: at(),
            filtered_by: None,
        }
    }

    #[test]
    fn header_and_current_sprint() {
        let md = render(&report(), at());
        assert!(md.starts_with("# Work Status\n"));
        assert!(md.contains("> **Updated:** 2026-01-30 14:05 UTC"));
        assert!(md.contains("**Sprint 185**\n- Start: January 26"));
        assert!(md.contains("- Release: 18 de fev. de 2026"));
        assert!(md.contains("| Sprint 185 | 18 de fev. de 2026 | Current |"));
    }

    #[test]
    fn long_titles_are_shortened() {
        let md = render(&report(), at());
        assert!(md.contains("| BEESIP-10009 | A very long initiative title that keeps going past... |"));
    }

    #[test]
    fn epics_grouped_by_sprint_newest_first() {
        let md = render(&report(), at());
        let order: Vec<usize> = ["### SP-186", "### SP-185", "### No sprint"]
            .iter()
            .map(|heading| md.find(heading).unwrap())
            .collect();
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(md.contains("| BEESCAD-501 | Bulk \\| import | N/A | M |"));
    }

    #[test]
    fn risks_by_gut_and_empty_bugs() {
        let md = render(&report(), at());
        assert!(md.find("BEESIP-9002").unwrap() < md.find("BEESIP-9001").unwrap());
        assert!(md.contains("No open bugs."));
        assert!(md.contains("| Open risks | 1 |"));
    }

    #[test]
    fn empty_report() {
        let mut empty = report();
        empty.sprints.clear();
        empty.initiatives.clear();
        empty.epics.clear();
        empty.risks.clear();
        let md = render(&empty, at());
        assert!(md.contains("No current sprint identified."));
        assert!(md.contains("No open risks."));
        assert_eq!(md.matches("| Current sprint | N/A |").count(), 1);
    }
}
