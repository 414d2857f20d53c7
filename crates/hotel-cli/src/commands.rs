use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, info_span, warn};

use hotel_cli::pipeline::{DatasetCache, DatasetKey, PipelineOptions, render_report};
use hotel_cli::types::{RenderOutcome, RenderRequest, RenderResult};
use hotel_ingest::resolve_data_path;
use hotel_report::ReportOptions;

use crate::cli::{RenderArgs, WatchArgs};
use crate::summary::print_summary;

fn render_request(args: &RenderArgs) -> Result<RenderRequest> {
    let data_path = resolve_data_path(args.data.as_deref()).context("locate data file")?;
    Ok(RenderRequest {
        data_path,
        output_path: args.output.clone(),
        json_path: args.json.clone(),
    })
}

fn pipeline_options(args: &RenderArgs) -> PipelineOptions {
    PipelineOptions {
        report: ReportOptions {
            preview_rows: args.preview_rows,
            ..ReportOptions::default()
        },
        ..PipelineOptions::default()
    }
}

/// Prints the missing-data messages to stderr.
fn report_missing_data(result: &RenderResult) {
    if let RenderOutcome::MissingData(messages) = &result.outcome {
        eprintln!("error: {}", messages.error);
        eprintln!("info: {}", messages.info);
    }
}

pub fn run_render(args: &RenderArgs) -> Result<RenderResult> {
    let request = render_request(args)?;
    let options = pipeline_options(args);
    let mut cache = DatasetCache::new();
    let result = render_report(&request, &options, &mut cache)?;
    report_missing_data(&result);
    Ok(result)
}

/// Polls the data file and re-renders on every change. Runs until the
/// process is interrupted.
pub fn run_watch(args: &WatchArgs) -> Result<()> {
    let request = render_request(&args.render)?;
    let options = pipeline_options(&args.render);
    let interval = Duration::from_millis(args.interval_ms.max(1));
    let span = info_span!("watch", path = %request.data_path.display());
    let _guard = span.enter();
    info!(interval_ms = args.interval_ms, "watching data file");

    let mut cache = DatasetCache::new();
    let mut last_seen: Option<Option<DatasetKey>> = None;
    loop {
        let current = DatasetKey::probe(&request.data_path);
        if last_seen.as_ref() != Some(&current) {
            match render_report(&request, &options, &mut cache) {
                Ok(result) => {
                    if result.is_missing_data() {
                        report_missing_data(&result);
                        warn!("data file missing, waiting for it to appear");
                    } else {
                        print_summary(&result);
                    }
                }
                Err(err) => error!(error = %format!("{err:#}"), "render failed"),
            }
            last_seen = Some(current);
        }
        thread::sleep(interval);
    }
}
