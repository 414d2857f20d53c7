//! Self-contained HTML dashboard page.
//!
//! Charts are inlined as SVG so the page works offline as a single file.

use std::path::Path;

use anyhow::{Context, Result};

use crate::charts::render_chart;
use crate::dashboard::{Dashboard, Preview};
use crate::panels::{Panel, PanelData, Slice};

/// Heading shown at the top of every page.
pub const PAGE_HEADING: &str = "Hotel Booking Analysis Project";

/// The two user-facing lines shown when the input file is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDataMessages {
    pub error: String,
    pub info: String,
}

/// Builds the error and instruction lines for a missing data file.
pub fn missing_data_messages(path: &Path) -> MissingDataMessages {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    MissingDataMessages {
        error: format!("{file_name} not found!"),
        info: "Place the CSV file in the same folder as the hotel-report executable".to_string(),
    }
}

/// Renders the full dashboard page.
pub fn render_dashboard_page(dashboard: &Dashboard) -> Result<String> {
    let mut sections = String::new();
    for panel in &dashboard.panels {
        sections.push_str(&render_panel_section(panel)?);
    }

    Ok(page(
        &dashboard.title,
        &format!(
            r#"<h1>{heading}</h1>
        <section class="preview">
            <h2>Dataset Preview</h2>
            <p class="meta">{rows} reservations after cleaning</p>
            {preview}
        </section>
        {sections}"#,
            heading = html_escape(PAGE_HEADING),
            rows = dashboard.row_count,
            preview = render_preview_table(&dashboard.preview),
            sections = sections,
        ),
    ))
}

/// Renders the page shown when the data file is absent: heading and the
/// two messages, no charts.
pub fn render_missing_data_page(title: &str, path: &Path) -> String {
    let messages = missing_data_messages(path);
    page(
        title,
        &format!(
            r#"<h1>{heading}</h1>
        <div class="alert error">{error}</div>
        <div class="alert info">{info}</div>"#,
            heading = html_escape(PAGE_HEADING),
            error = html_escape(&messages.error),
            info = html_escape(&messages.info),
        ),
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        {body}
    </div>
</body>
</html>
"#,
        title = html_escape(title),
        css = inline_css(),
        body = body,
    )
}

fn render_panel_section(panel: &Panel) -> Result<String> {
    let svg = render_chart(panel)
        .with_context(|| format!("render chart for panel '{}'", panel.heading))?;
    let table = match &panel.data {
        PanelData::Pie(slices) => render_slice_table(slices),
        _ => String::new(),
    };
    Ok(format!(
        r#"
        <section class="panel">
            <h2>{heading}</h2>
            <div class="chart">{svg}</div>
            {table}
        </section>"#,
        heading = html_escape(&panel.heading),
        svg = svg,
        table = table,
    ))
}

fn render_preview_table(preview: &Preview) -> String {
    if preview.columns.is_empty() {
        return "<p class=\"meta\">No rows to preview</p>".to_string();
    }
    let header: String = preview
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", html_escape(c)))
        .collect();
    let body: String = preview
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", html_escape(cell)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    format!(
        r#"<div class="table-wrap"><table><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table></div>"#
    )
}

fn render_slice_table(slices: &[Slice]) -> String {
    let rows: String = slices
        .iter()
        .map(|slice| {
            format!(
                "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{:.2}%</td></tr>",
                html_escape(&slice.label),
                slice.count,
                slice.percent
            )
        })
        .collect();
    format!(
        r#"<table class="slices"><thead><tr><th>Category</th><th>Count</th><th>Share</th></tr></thead><tbody>{rows}</tbody></table>"#
    )
}

fn inline_css() -> &'static str {
    r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 0; background: #f6f6f8; color: #222; }
.container { max-width: 1280px; margin: 0 auto; padding: 24px; }
h1 { margin: 0 0 24px; }
h2 { margin: 0 0 12px; font-size: 1.3em; }
section { background: #fff; border-radius: 8px; padding: 16px 20px; margin-bottom: 20px; box-shadow: 0 1px 3px rgba(0,0,0,0.08); }
.meta { color: #666; margin: 0 0 8px; }
.table-wrap { overflow-x: auto; }
table { border-collapse: collapse; font-size: 0.85em; }
th, td { border-bottom: 1px solid #e3e3e8; padding: 4px 8px; text-align: left; white-space: nowrap; }
th { background: #f0f0f4; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
table.slices { margin-top: 12px; }
.chart svg { max-width: 100%; height: auto; }
.alert { border-radius: 6px; padding: 12px 16px; margin-bottom: 12px; }
.alert.error { background: #fdecea; color: #8a1c1c; }
.alert.info { background: #e8f1fb; color: #1c4a8a; }
"#
}

/// Escapes text for use in HTML content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
