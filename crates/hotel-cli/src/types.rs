use std::path::PathBuf;

use hotel_report::MissingDataMessages;
use hotel_transform::CleaningReport;

/// Where one render reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub data_path: PathBuf,
    pub output_path: PathBuf,
    pub json_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    pub data_path: PathBuf,
    pub output_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub outcome: RenderOutcome,
}

impl RenderResult {
    /// True when the page only carries the missing-data messages.
    pub fn is_missing_data(&self) -> bool {
        matches!(self.outcome, RenderOutcome::MissingData(_))
    }

    /// Process exit status for a one-shot render: 1 when the data file was
    /// missing.
    pub fn exit_code(&self) -> i32 {
        if self.is_missing_data() { 1 } else { 0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered(RenderedSummary),
    MissingData(MissingDataMessages),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSummary {
    pub cleaning: CleaningReport,
    pub row_count: usize,
    pub panels: Vec<PanelSummary>,
    /// The dashboard came from the dataset cache.
    pub cache_hit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSummary {
    pub heading: String,
    pub chart: &'static str,
    pub points: usize,
}
