//! SVG chart rendering with plotters.
//!
//! Each function returns a standalone `<svg>` document suitable for
//! inlining into the dashboard page.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use hotel_transform::{date_to_days, days_to_date};

use crate::panels::{GroupedCounts, Panel, PanelData, RateSeries, Slice};

const FONT: &str = "sans-serif";

/// Sequential palette, dark purple to peach.
const ROCKET: [RGBColor; 6] = [
    RGBColor(0x35, 0x19, 0x3e),
    RGBColor(0x70, 0x1f, 0x57),
    RGBColor(0xad, 0x17, 0x59),
    RGBColor(0xe1, 0x33, 0x42),
    RGBColor(0xf3, 0x76, 0x51),
    RGBColor(0xf6, 0xb4, 0x8f),
];

/// Categorical palette for pie slices and line series.
const CATEGORICAL: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

const BAR_SIZE: (u32, u32) = (640, 420);
const GROUPED_BAR_SIZE: (u32, u32) = (880, 440);
const LINE_SIZE: (u32, u32) = (1200, 480);
const PIE_SIZE: (u32, u32) = (640, 640);

type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Picks evenly spaced colors from the sequential palette.
fn series_color(index: usize, count: usize) -> RGBColor {
    if count <= 1 {
        return ROCKET[1];
    }
    let last = ROCKET.len() - 1;
    ROCKET[(index * last / (count - 1)).min(last)]
}

/// Upper bound for a value axis with some headroom.
fn axis_max(max: f64) -> f64 {
    if max <= 0.0 { 1.0 } else { max * 1.1 }
}

/// Label for a category axis tick; ticks between categories stay blank.
fn category_label(categories: &[String], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    categories.get(nearest as usize).cloned().unwrap_or_default()
}

fn date_label(x: f64) -> String {
    days_to_date(x.round() as i32)
        .map(|date| date.format("%Y-%m").to_string())
        .unwrap_or_default()
}

fn draw_message(area: &SvgArea<'_>, message: &str) -> Result<()> {
    let (width, height) = area.dim_in_pixel();
    let style = (FONT, 18)
        .into_font()
        .color(&BLACK.mix(0.6))
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        message.to_string(),
        (width as i32 / 2, height as i32 / 2),
        style,
    ))?;
    Ok(())
}

/// Renders the chart for a panel.
pub fn render_chart(panel: &Panel) -> Result<String> {
    let (x_desc, y_desc) = panel.kind.axis_labels();
    match &panel.data {
        PanelData::Bar(counts) => render_bar_chart(&panel.title, x_desc, y_desc, counts, BAR_SIZE),
        PanelData::GroupedBar(counts) => {
            render_bar_chart(&panel.title, x_desc, y_desc, counts, GROUPED_BAR_SIZE)
        }
        PanelData::Line(series) => render_line_chart(&panel.title, x_desc, y_desc, series),
        PanelData::Pie(slices) => render_pie_chart(&panel.title, slices),
    }
}

/// Bar chart with one bar per category and series; series are grouped
/// side by side and get a legend when there is more than one.
pub fn render_bar_chart(
    title: &str,
    x_desc: &str,
    y_desc: &str,
    counts: &GroupedCounts,
    size: (u32, u32),
) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE)?;

        if counts.categories.is_empty() {
            let area = root.titled(title, (FONT, 22))?;
            draw_message(&area, "No reservations to show")?;
        } else {
            let n = counts.categories.len();
            let mut chart = ChartBuilder::on(&root)
                .caption(title, (FONT, 22))
                .margin(16)
                .x_label_area_size(48)
                .y_label_area_size(72)
                .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..axis_max(counts.max_value() as f64))?;

            let categories = &counts.categories;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(n)
                .x_label_formatter(&|x| category_label(categories, *x))
                .y_label_formatter(&|y| format!("{y:.0}"))
                .x_desc(x_desc)
                .y_desc(y_desc)
                .label_style((FONT, 14))
                .draw()?;

            let series_count = counts.series.len().max(1);
            let group_width = 0.8;
            let bar_width = group_width / series_count as f64;
            for (s_idx, series) in counts.series.iter().enumerate() {
                let color = series_color(s_idx, series_count);
                let offset = s_idx as f64 * bar_width - group_width / 2.0;
                let anno = chart.draw_series(series.values.iter().enumerate().map(
                    |(c_idx, value)| {
                        let x0 = c_idx as f64 + offset;
                        Rectangle::new([(x0, 0.0), (x0 + bar_width, *value as f64)], color.filled())
                    },
                ))?;
                if series_count > 1 {
                    anno.label(series.label.as_str()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled())
                    });
                }
            }

            if series_count > 1 {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(&WHITE.mix(0.85))
                    .border_style(&BLACK)
                    .label_font((FONT, 14))
                    .draw()?;
            }
        }
        root.present()?;
    }
    Ok(svg)
}

/// Line chart of mean rate over status date, one line per hotel type.
pub fn render_line_chart(
    title: &str,
    x_desc: &str,
    y_desc: &str,
    series: &[RateSeries],
) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, LINE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let days: Vec<i32> = series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| date_to_days(p.date)))
            .collect();
        let rates: Vec<f64> = series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.mean_rate))
            .collect();

        match (days.iter().min(), days.iter().max()) {
            (Some(&first), Some(&last)) => {
                let (x_min, x_max) = if first == last {
                    (f64::from(first) - 1.0, f64::from(last) + 1.0)
                } else {
                    (f64::from(first), f64::from(last))
                };
                let y_min = rates.iter().copied().fold(0.0, f64::min);
                let y_max = axis_max(rates.iter().copied().fold(0.0, f64::max));

                let mut chart = ChartBuilder::on(&root)
                    .caption(title, (FONT, 24))
                    .margin(20)
                    .x_label_area_size(48)
                    .y_label_area_size(72)
                    .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

                chart
                    .configure_mesh()
                    .x_labels(12)
                    .x_label_formatter(&|x| date_label(*x))
                    .y_label_formatter(&|y| format!("{y:.0}"))
                    .x_desc(x_desc)
                    .y_desc(y_desc)
                    .label_style((FONT, 14))
                    .draw()?;

                for (idx, line) in series.iter().enumerate() {
                    let color = CATEGORICAL[idx % CATEGORICAL.len()];
                    chart
                        .draw_series(LineSeries::new(
                            line.points
                                .iter()
                                .map(|p| (f64::from(date_to_days(p.date)), p.mean_rate)),
                            color.stroke_width(2),
                        ))?
                        .label(line.hotel.as_str())
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                }

                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperLeft)
                    .background_style(&WHITE.mix(0.85))
                    .border_style(&BLACK)
                    .label_font((FONT, 16))
                    .draw()?;
            }
            _ => {
                let area = root.titled(title, (FONT, 24))?;
                draw_message(&area, "No reservations to show")?;
            }
        }
        root.present()?;
    }
    Ok(svg)
}

/// Pie chart with category labels and two-decimal percentages.
pub fn render_pie_chart(title: &str, slices: &[Slice]) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, PIE_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let area = root.titled(title, (FONT, 22))?;

        let drawn: Vec<&Slice> = slices.iter().filter(|s| s.count > 0).collect();
        if drawn.is_empty() {
            draw_message(&area, "No reservations to show")?;
        } else {
            let (width, height) = area.dim_in_pixel();
            let center = (width as i32 / 2, height as i32 / 2);
            let radius = f64::from(width.min(height)) * 0.34;
            let sizes: Vec<f64> = drawn.iter().map(|s| s.count as f64).collect();
            let colors: Vec<RGBColor> = (0..drawn.len())
                .map(|idx| CATEGORICAL[idx % CATEGORICAL.len()])
                .collect();
            let labels: Vec<&str> = drawn.iter().map(|s| s.label.as_str()).collect();

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(-90.0);
            pie.label_style((FONT, 16).into_font().color(&BLACK));
            pie.percentages((FONT, 13).into_font().color(&WHITE));
            area.draw(&pie)?;
        }
        root.present()?;
    }
    Ok(svg)
}
