use serde::Serialize;
use serde_json::Value;
use sitrep_core::SituationReport;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{TableStyle, render_rows};

/// Render any serializable response in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let value = serde_json::to_value(value)?;
            Ok(render_value(&value, style()))
        }
    }
}

pub fn emit<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Print a report. Tables get one block per record kind.
pub fn emit_report(report: &SituationReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", report_tables(report, style()));
            Ok(())
        }
        _ => emit(report, format),
    }
}

fn style() -> TableStyle {
    let prefs = ui::prefs();
    TableStyle {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn report_tables(report: &SituationReport, style: TableStyle) -> String {
    let mut blocks = vec![format!(
        "{} (version {}, parsed {})",
        report.page.title,
        report.page.version,
        report.parsed_at.format("%Y-%m-%d %H:%M UTC")
    )];
    let mut block = |title: &str, count: usize, table: String| {
        blocks.push(format!("\n{title} ({count})"));
        if count > 0 {
            blocks.push(table);
        }
    };

    block(
        "Sprints",
        report.sprints.len(),
        render_rows(
            &["sprint", "start", "end", "release", "current"],
            &report
                .sprints
                .iter()
                .map(|s| {
                    vec![
                        s.name.clone(),
                        s.start_date.clone(),
                        s.end_date.clone(),
                        s.release_date.clone().unwrap_or_default(),
                        if s.is_current { "*".into() } else { String::new() },
                    ]
                })
                .collect::<Vec<_>>(),
            style,
        ),
    );
    block(
        "Initiatives",
        report.initiatives.len(),
        render_rows(
            &["key", "priority", "team", "status", "title"],
            &report
                .initiatives
                .iter()
                .map(|i| {
                    vec![
                        i.external_key.clone(),
                        i.priority.to_string(),
                        i.team.clone(),
                        i.status.clone(),
                        i.title.clone(),
                    ]
                })
                .collect::<Vec<_>>(),
            style,
        ),
    );
    block(
        "Epics",
        report.epics.len(),
        render_rows(
            &["key", "initiative", "size", "sprint", "status", "title"],
            &report
                .epics
                .iter()
                .map(|e| {
                    vec![
                        e.external_key.clone(),
                        e.initiative_key.clone().unwrap_or_default(),
                        e.size.clone(),
                        e.sprint_ref.clone().unwrap_or_default(),
                        e.status.clone(),
                        e.title.clone(),
                    ]
                })
                .collect::<Vec<_>>(),
            style,
        ),
    );
    block(
        "Risks",
        report.risks.len(),
        render_rows(
            &["key", "gut", "status", "assignee", "title"],
            &report
                .risks
                .iter()
                .map(|r| {
                    vec![
                        r.external_key.clone(),
                        r.gut_score.to_string(),
                        r.status.clone(),
                        r.assignee.clone(),
                        r.title.clone(),
                    ]
                })
                .collect::<Vec<_>>(),
            style,
        ),
    );
    block(
        "Bugs",
        report.bugs.len(),
        render_rows(
            &["key", "team", "priority", "status", "title"],
            &report
                .bugs
                .iter()
                .map(|b| {
                    vec![
                        b.external_key.clone(),
                        b.team.clone(),
                        b.priority.clone(),
                        b.status.clone(),
                        b.title.clone(),
                    ]
                })
                .collect::<Vec<_>>(),
            style,
        ),
    );

    if !report.diagnostics.warnings.is_empty() {
        blocks.push("\nWarnings".to_string());
        blocks.extend(report.diagnostics.warnings.iter().map(|w| format!("  - {w}")));
    }
    blocks.join("\n")
}

fn render_value(value: &Value, style: TableStyle) -> String {
    match value {
        Value::Array(items) => render_array(items, style),
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect();
            render_rows(&["field", "value"], &rows, style)
        }
        scalar => cell(scalar),
    }
}

fn render_array(items: &[Value], style: TableStyle) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows: Vec<Vec<String>> = items.iter().map(|item| vec![cell(item)]).collect();
        return render_rows(&["value"], &rows, style);
    }

    let mut headers: Vec<&str> = Vec::new();
    for key in items.iter().filter_map(Value::as_object).flat_map(|map| map.keys()) {
        if !headers.contains(&key.as_str()) {
            headers.push(key);
        }
    }
    let rows: Vec<Vec<String>> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| "-".to_string(), cell))
                .collect()
        })
        .collect();
    render_rows(&headers, &rows, style)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) if items.iter().all(|v| !v.is_object() && !v.is_array()) => {
            items.iter().map(cell).collect::<Vec<_>>().join(", ")
        }
        other => other.to_string(),
    }
}
