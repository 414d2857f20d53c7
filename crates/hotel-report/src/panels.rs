//! Chart data for the six dashboard panels.
//!
//! Every generator reads the cleaned data and returns plain values; the
//! seasonal panel derives its own month column from the frame.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use hotel_model::{CancellationStatus, HotelType, IS_CANCELED, MONTH, parse_cancellation_flag};
use hotel_transform::{Reservations, column_f64_values, column_text_values, with_month_column};

/// Which panel a chart belongs to, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    CancellationRatio,
    CancellationPercentage,
    CancellationByHotel,
    RateTrend,
    SeasonalCancellation,
    TopCancellingCountries,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        PanelKind::CancellationRatio,
        PanelKind::CancellationPercentage,
        PanelKind::CancellationByHotel,
        PanelKind::RateTrend,
        PanelKind::SeasonalCancellation,
        PanelKind::TopCancellingCountries,
    ];

    /// Subsection heading shown above the chart.
    pub fn heading(&self) -> &'static str {
        match self {
            PanelKind::CancellationRatio => "Reservation Cancellation Count",
            PanelKind::CancellationPercentage => "Reservation Cancellation Percentage",
            PanelKind::CancellationByHotel => "Reservation Status by Hotel Type",
            PanelKind::RateTrend => "Average Daily Rate (ADR) Trend",
            PanelKind::SeasonalCancellation => "Reservation Status per Month",
            PanelKind::TopCancellingCountries => "Top Countries with Reservation Cancellations",
        }
    }

    /// Caption drawn inside the chart.
    pub fn chart_title(&self) -> &'static str {
        match self {
            PanelKind::CancellationRatio => "Reservation Status Count",
            PanelKind::CancellationPercentage => "Share of Canceled Reservations",
            PanelKind::CancellationByHotel => "Reservation Status by Hotel Type",
            PanelKind::RateTrend => "Average Daily Rate in City and Resort Hotels",
            PanelKind::SeasonalCancellation => "Reservation Status per Month",
            PanelKind::TopCancellingCountries => "Top Countries with Reservation Cancellations",
        }
    }

    /// Axis descriptions for cartesian charts.
    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            PanelKind::CancellationRatio => ("Reservation Status", "Number of Reservations"),
            PanelKind::CancellationByHotel => ("Hotel Type", "Number of Reservations"),
            PanelKind::RateTrend => ("Reservation Status Date", "Average Daily Rate"),
            PanelKind::SeasonalCancellation => ("Month", "Number of Reservations"),
            PanelKind::CancellationPercentage | PanelKind::TopCancellingCountries => ("", ""),
        }
    }
}

/// One bar series across all categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountSeries {
    pub label: String,
    pub values: Vec<u64>,
}

/// Counts per category, one series per hue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedCounts {
    pub categories: Vec<String>,
    pub series: Vec<CountSeries>,
}

impl GroupedCounts {
    /// Sum over every series and category.
    pub fn total(&self) -> u64 {
        self.series.iter().flat_map(|s| s.values.iter()).sum()
    }

    pub fn max_value(&self) -> u64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Count for a series label and category, if both exist.
    pub fn value(&self, series: &str, category: &str) -> Option<u64> {
        let idx = self.categories.iter().position(|c| c == category)?;
        self.series
            .iter()
            .find(|s| s.label == series)
            .and_then(|s| s.values.get(idx).copied())
    }
}

/// Mean rate on one status date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub mean_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSeries {
    pub hotel: HotelType,
    /// Ordered by date ascending.
    pub points: Vec<RatePoint>,
}

/// A labelled pie slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub count: u64,
    /// Share of the pie total, 0-100.
    pub percent: f64,
}

/// Data behind one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "chart", content = "data", rename_all = "snake_case")]
pub enum PanelData {
    Bar(GroupedCounts),
    GroupedBar(GroupedCounts),
    Line(Vec<RateSeries>),
    Pie(Vec<Slice>),
}

/// A rendered-ready panel: heading plus chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub heading: String,
    pub title: String,
    pub data: PanelData,
}

impl Panel {
    pub fn new(kind: PanelKind, data: PanelData) -> Self {
        Self {
            kind,
            heading: kind.heading().to_string(),
            title: kind.chart_title().to_string(),
            data,
        }
    }

    /// Number of bars, points, or slices in the chart.
    pub fn data_points(&self) -> usize {
        match &self.data {
            PanelData::Bar(counts) | PanelData::GroupedBar(counts) => {
                counts.series.iter().map(|s| s.values.len()).sum()
            }
            PanelData::Line(series) => series.iter().map(|s| s.points.len()).sum(),
            PanelData::Pie(slices) => slices.len(),
        }
    }
}

fn status_series(counts: &[[u64; 2]]) -> Vec<CountSeries> {
    CancellationStatus::ALL
        .iter()
        .enumerate()
        .map(|(idx, status)| CountSeries {
            label: status.label().to_string(),
            values: counts.iter().map(|pair| pair[idx]).collect(),
        })
        .collect()
}

/// Not-canceled vs. canceled counts, in that order.
pub fn cancellation_counts(reservations: &Reservations) -> GroupedCounts {
    let canceled = reservations.canceled_count() as u64;
    let not_canceled = reservations.len() as u64 - canceled;
    GroupedCounts {
        categories: CancellationStatus::ALL
            .iter()
            .map(|s| s.label().to_string())
            .collect(),
        series: vec![CountSeries {
            label: "Reservations".to_string(),
            values: vec![not_canceled, canceled],
        }],
    }
}

/// Not-canceled vs. canceled as percentages of all rows.
pub fn cancellation_shares(reservations: &Reservations) -> Vec<Slice> {
    let counts = cancellation_counts(reservations);
    let values = counts
        .series
        .first()
        .map(|s| s.values.clone())
        .unwrap_or_default();
    slices_from_counts(counts.categories.into_iter().zip(values))
}

fn slices_from_counts(items: impl IntoIterator<Item = (String, u64)>) -> Vec<Slice> {
    let items: Vec<(String, u64)> = items.into_iter().collect();
    let total: u64 = items.iter().map(|(_, count)| count).sum();
    items
        .into_iter()
        .map(|(label, count)| Slice {
            label,
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect()
}

/// Status counts per hotel type; hotel types in first-appearance order.
pub fn cancellation_by_hotel(reservations: &Reservations) -> GroupedCounts {
    let mut categories: Vec<String> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<[u64; 2]> = Vec::new();
    for row in reservations.iter() {
        let idx = *index.entry(row.hotel).or_insert_with(|| {
            categories.push(row.hotel.to_string());
            counts.push([0, 0]);
            categories.len() - 1
        });
        counts[idx][row.status().index()] += 1;
    }
    GroupedCounts {
        series: status_series(&counts),
        categories,
    }
}

/// Mean rate per status date for each hotel type, dates ascending.
pub fn rate_trend(reservations: &Reservations) -> Vec<RateSeries> {
    HotelType::ALL
        .iter()
        .map(|hotel| {
            let mut by_date: BTreeMap<NaiveDate, (f64, u64)> = BTreeMap::new();
            for row in reservations.iter().filter(|r| r.hotel == hotel.as_str()) {
                let entry = by_date.entry(row.status_date).or_insert((0.0, 0));
                entry.0 += row.adr;
                entry.1 += 1;
            }
            RateSeries {
                hotel: *hotel,
                points: by_date
                    .into_iter()
                    .map(|(date, (sum, count))| RatePoint {
                        date,
                        mean_rate: sum / count as f64,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Status counts per calendar month present in the data, months ascending.
///
/// Derives a `month` column on a copy of the frame; the caller's frame is
/// not modified.
pub fn seasonal_cancellations(df: &DataFrame) -> Result<GroupedCounts> {
    let with_month = with_month_column(df).context("derive month column")?;
    let months = column_f64_values(&with_month, MONTH).context("read month column")?;
    let flags = column_text_values(&with_month, IS_CANCELED).context("read cancellation flags")?;

    let mut by_month: BTreeMap<u32, [u64; 2]> = BTreeMap::new();
    for (month, flag) in months.into_iter().zip(flags) {
        let (Some(month), Some(flag)) = (month, flag) else {
            continue;
        };
        let canceled = parse_cancellation_flag(&flag)
            .with_context(|| format!("invalid cancellation flag '{flag}'"))?;
        let status = CancellationStatus::from_flag(canceled);
        by_month.entry(month as u32).or_insert([0, 0])[status.index()] += 1;
    }

    let categories = by_month.keys().map(u32::to_string).collect();
    let counts: Vec<[u64; 2]> = by_month.into_values().collect();
    Ok(GroupedCounts {
        categories,
        series: status_series(&counts),
    })
}

/// The `limit` countries with the most cancellations, descending.
///
/// Only canceled rows are counted. Ties keep first-appearance order.
/// Percentages are shares of the listed total.
pub fn top_cancelling_countries(reservations: &Reservations, limit: usize) -> Vec<Slice> {
    let mut order: Vec<(&str, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for row in reservations.iter().filter(|r| r.canceled) {
        match index.get(row.country) {
            Some(&idx) => order[idx].1 += 1,
            None => {
                index.insert(row.country, order.len());
                order.push((row.country, 1));
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(limit);
    slices_from_counts(
        order
            .into_iter()
            .map(|(country, count)| (country.to_string(), count)),
    )
}

/// Builds all six panels in page order.
pub fn build_panels(
    df: &DataFrame,
    reservations: &Reservations,
    top_countries: usize,
) -> Result<Vec<Panel>> {
    let mut panels = Vec::with_capacity(PanelKind::ALL.len());
    for kind in PanelKind::ALL {
        let data = match kind {
            PanelKind::CancellationRatio => PanelData::Bar(cancellation_counts(reservations)),
            PanelKind::CancellationPercentage => PanelData::Pie(cancellation_shares(reservations)),
            PanelKind::CancellationByHotel => {
                PanelData::GroupedBar(cancellation_by_hotel(reservations))
            }
            PanelKind::RateTrend => PanelData::Line(rate_trend(reservations)),
            PanelKind::SeasonalCancellation => PanelData::GroupedBar(seasonal_cancellations(df)?),
            PanelKind::TopCancellingCountries => {
                PanelData::Pie(top_cancelling_countries(reservations, top_countries))
            }
        };
        panels.push(Panel::new(kind, data));
    }
    Ok(panels)
}
