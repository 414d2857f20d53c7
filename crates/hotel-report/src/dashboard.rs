//! Dashboard assembly: title, preview table, and panels.

use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use hotel_ingest::any_to_string;
use hotel_model::{DEFAULT_PREVIEW_ROWS, TOP_COUNTRY_LIMIT};
use hotel_transform::Reservations;

use crate::panels::{Panel, build_panels};

/// Page title used when none is configured.
pub const DEFAULT_TITLE: &str = "Hotel Booking Analysis";

/// Knobs for [`build_dashboard`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub title: String,
    /// Rows shown in the dataset preview.
    pub preview_rows: usize,
    /// Countries listed in the cancellation breakdown.
    pub top_countries: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            top_countries: TOP_COUNTRY_LIMIT,
        }
    }
}

/// First rows of the cleaned dataset as display strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything the page shows, independent of how it is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub title: String,
    /// Rows retained after cleaning.
    pub row_count: usize,
    pub preview: Preview,
    pub panels: Vec<Panel>,
}

/// Collects the first `rows` rows of `df` as strings.
pub fn build_preview(df: &DataFrame, rows: usize) -> Result<Preview> {
    let head = df.head(Some(rows));
    let columns: Vec<String> = head
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut preview_rows = Vec::with_capacity(head.height());
    for idx in 0..head.height() {
        let mut row = Vec::with_capacity(columns.len());
        for column in head.get_columns() {
            row.push(any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
        }
        preview_rows.push(row);
    }
    Ok(Preview {
        columns,
        rows: preview_rows,
    })
}

/// Builds the dashboard from a cleaned frame.
pub fn build_dashboard(df: &DataFrame, options: &ReportOptions) -> Result<Dashboard> {
    let span = info_span!("dashboard", rows = df.height());
    let _guard = span.enter();
    let start = Instant::now();

    let reservations = Reservations::from_frame(df).context("extract reservation columns")?;
    let preview = build_preview(df, options.preview_rows)?;
    let panels = build_panels(df, &reservations, options.top_countries)?;
    for panel in &panels {
        debug!(panel = ?panel.kind, points = panel.data_points(), "panel data ready");
    }
    info!(
        panels = panels.len(),
        duration_ms = start.elapsed().as_millis(),
        "dashboard data built"
    );

    Ok(Dashboard {
        title: options.title.clone(),
        row_count: reservations.len(),
        preview,
        panels,
    })
}
