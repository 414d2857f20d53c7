//! Dashboard pipeline with explicit stages.
//!
//! 1. **Ingest**: read the reservation CSV as text columns
//! 2. **Clean**: normalize dates, drop optional columns, missing rows and
//!    rate outliers
//! 3. **Report**: build the preview and the six panels
//! 4. **Output**: write the HTML page and the optional JSON export
//!
//! A missing data file is not an error at the output stage: the page is
//! written with the missing-data messages instead of charts.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use hotel_ingest::{IngestError, LoadedTable, read_reservations};
use hotel_report::{
    Dashboard, PanelData, ReportOptions, build_dashboard, missing_data_messages,
    render_dashboard_page, render_missing_data_page,
};
use hotel_transform::{CleaningOptions, CleaningReport, clean_reservations};

use crate::types::{PanelSummary, RenderOutcome, RenderRequest, RenderResult, RenderedSummary};

/// Knobs for every stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOptions {
    pub cleaning: CleaningOptions,
    pub report: ReportOptions,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub data_path: PathBuf,
    /// Header names as read from the file.
    pub source_columns: Vec<String>,
    pub cleaning: CleaningReport,
    pub dashboard: Dashboard,
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

pub fn ingest(path: &Path) -> Result<LoadedTable> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let table = read_reservations(path).with_context(|| format!("load {}", path.display()))?;
    debug!(
        rows = table.row_count(),
        columns = table.columns.len(),
        "reservations loaded"
    );
    Ok(table)
}

/// True when the error chain starts at a missing data file.
pub fn is_missing_data(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<IngestError>()
        .is_some_and(IngestError::is_file_not_found)
}

// ============================================================================
// Stage 2: Clean
// ============================================================================

pub fn clean(table: LoadedTable, options: &CleaningOptions) -> Result<(DataFrame, CleaningReport)> {
    clean_reservations(table.data, options).context("clean reservations")
}

// ============================================================================
// Stage 3: Report
// ============================================================================

pub fn report(df: &DataFrame, options: &ReportOptions) -> Result<Dashboard> {
    build_dashboard(df, options).context("build dashboard")
}

/// Runs ingest, clean and report for one data file.
pub fn run_pipeline(path: &Path, options: &PipelineOptions) -> Result<PipelineOutput> {
    let start = Instant::now();
    let table = ingest(path)?;
    let source_columns = table.columns.clone();
    let (df, cleaning) = clean(table, &options.cleaning)?;
    let dashboard = report(&df, &options.report)?;
    info!(
        rows = dashboard.row_count,
        panels = dashboard.panels.len(),
        duration_ms = start.elapsed().as_millis(),
        "pipeline complete"
    );
    Ok(PipelineOutput {
        data_path: path.to_path_buf(),
        source_columns,
        cleaning,
        dashboard,
    })
}

// ============================================================================
// Dataset cache
// ============================================================================

/// Identity of a data file on disk: path, modification time and length.
///
/// A rewrite that keeps the same length within one modification-time tick
/// produces an equal key, so the cache would serve the previous output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl DatasetKey {
    /// Reads the key from file metadata; `None` when the file is absent.
    pub fn probe(path: &Path) -> Option<Self> {
        let metadata = fs::metadata(path).ok()?;
        Some(Self {
            path: path.to_path_buf(),
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

#[derive(Debug)]
struct CachedRun {
    key: DatasetKey,
    options: PipelineOptions,
    output: Arc<PipelineOutput>,
}

/// Result of [`DatasetCache::get_or_run`].
#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub output: Arc<PipelineOutput>,
    pub hit: bool,
}

/// Holds the most recent pipeline output, reused while the data file and
/// options are unchanged.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<CachedRun>,
    hits: u64,
    misses: u64,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached output for `path`, running the pipeline when the
    /// file or the options changed since the last run.
    pub fn get_or_run(&mut self, path: &Path, options: &PipelineOptions) -> Result<CacheLookup> {
        let key = DatasetKey::probe(path);
        if let (Some(key), Some(entry)) = (&key, &self.entry)
            && entry.key == *key
            && entry.options == *options
        {
            self.hits += 1;
            debug!(path = %path.display(), "dataset cache hit");
            return Ok(CacheLookup {
                output: Arc::clone(&entry.output),
                hit: true,
            });
        }

        self.misses += 1;
        let result = run_pipeline(path, options);
        let output = match result {
            Ok(output) => Arc::new(output),
            Err(error) => {
                self.entry = None;
                return Err(error);
            }
        };
        // A file without metadata is never cached.
        self.entry = key.map(|key| CachedRun {
            key,
            options: options.clone(),
            output: Arc::clone(&output),
        });
        Ok(CacheLookup { output, hit: false })
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

// ============================================================================
// Stage 4: Output
// ============================================================================

/// Runs the pipeline through `cache` and writes the page.
///
/// When the data file is missing, the page is written with only the
/// missing-data messages and the result says so; the caller decides the
/// exit status.
pub fn render_report(
    request: &RenderRequest,
    options: &PipelineOptions,
    cache: &mut DatasetCache,
) -> Result<RenderResult> {
    let span = info_span!("render", output = %request.output_path.display());
    let _guard = span.enter();

    let lookup = match cache.get_or_run(&request.data_path, options) {
        Ok(lookup) => lookup,
        Err(error) if is_missing_data(&error) => {
            let page = render_missing_data_page(&options.report.title, &request.data_path);
            write_output(&request.output_path, &page)?;
            return Ok(RenderResult {
                data_path: request.data_path.clone(),
                output_path: request.output_path.clone(),
                json_path: None,
                outcome: RenderOutcome::MissingData(missing_data_messages(&request.data_path)),
            });
        }
        Err(error) => return Err(error),
    };

    let dashboard = &lookup.output.dashboard;
    let page = render_dashboard_page(dashboard).context("render dashboard page")?;
    write_output(&request.output_path, &page)?;
    if let Some(json_path) = &request.json_path {
        let json = serde_json::to_string_pretty(dashboard).context("serialize dashboard")?;
        write_output(json_path, &json)?;
    }
    info!(
        output = %request.output_path.display(),
        cache_hit = lookup.hit,
        "dashboard written"
    );

    Ok(RenderResult {
        data_path: request.data_path.clone(),
        output_path: request.output_path.clone(),
        json_path: request.json_path.clone(),
        outcome: RenderOutcome::Rendered(RenderedSummary {
            cleaning: lookup.output.cleaning.clone(),
            row_count: dashboard.row_count,
            panels: summarize_panels(dashboard),
            cache_hit: lookup.hit,
        }),
    })
}

fn summarize_panels(dashboard: &Dashboard) -> Vec<PanelSummary> {
    dashboard
        .panels
        .iter()
        .map(|panel| PanelSummary {
            heading: panel.heading.clone(),
            chart: match panel.data {
                PanelData::Bar(_) => "bar",
                PanelData::GroupedBar(_) => "grouped bar",
                PanelData::Line(_) => "line",
                PanelData::Pie(_) => "pie",
            },
            points: panel.data_points(),
        })
        .collect()
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}
