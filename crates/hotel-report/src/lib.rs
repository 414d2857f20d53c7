//! Hotel booking dashboard.
//!
//! Turns a cleaned reservation frame into panel data ([`build_dashboard`]),
//! renders each panel as an SVG chart, and assembles the HTML page.

pub mod charts;
pub mod dashboard;
pub mod html;
pub mod panels;

pub use charts::{render_bar_chart, render_chart, render_line_chart, render_pie_chart};
pub use dashboard::{DEFAULT_TITLE, Dashboard, Preview, ReportOptions, build_dashboard, build_preview};
pub use html::{
    MissingDataMessages, PAGE_HEADING, html_escape, missing_data_messages,
    render_dashboard_page, render_missing_data_page,
};
pub use panels::{
    CountSeries, GroupedCounts, Panel, PanelData, PanelKind, RatePoint, RateSeries, Slice,
    build_panels, cancellation_by_hotel, cancellation_counts, cancellation_shares, rate_trend,
    seasonal_cancellations, top_cancelling_countries,
};
