//! Tests for panel data built from cleaned frames.

use polars::prelude::{Column, DataFrame};

use hotel_report::{
    Dashboard, PanelData, PanelKind, ReportOptions, build_dashboard, cancellation_by_hotel,
    cancellation_counts, cancellation_shares, rate_trend, seasonal_cancellations,
    top_cancelling_countries,
};
use hotel_model::HotelType;
use hotel_transform::{CleaningOptions, Reservations, clean_reservations};

fn text_df(columns: Vec<(&str, Vec<String>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Column::new(name.into(), values))
        .collect();
    DataFrame::new(cols).unwrap()
}

/// Builds a cleaned frame from (hotel, canceled, adr, country, date) rows.
fn cleaned(rows: &[(&str, &str, &str, &str, &str)]) -> DataFrame {
    let mut fields: [Vec<String>; 5] = Default::default();
    for (hotel, canceled, adr, country, date) in rows {
        fields[0].push(hotel.to_string());
        fields[1].push(canceled.to_string());
        fields[2].push(adr.to_string());
        fields[3].push(country.to_string());
        fields[4].push(date.to_string());
    }
    let [hotel, canceled, adr, country, date] = fields;
    let df = text_df(vec![
        ("hotel", hotel),
        ("is_canceled", canceled),
        ("adr", adr),
        ("country", country),
        ("reservation_status_date", date),
    ]);
    clean_reservations(df, &CleaningOptions::default()).unwrap().0
}

fn sample() -> DataFrame {
    cleaned(&[
        ("Resort Hotel", "0", "75", "PRT", "2015-01-05"),
        ("City Hotel", "1", "90", "PRT", "2015-01-05"),
        ("City Hotel", "1", "110", "GBR", "2015-02-10"),
        ("Resort Hotel", "1", "60", "ESP", "2015-02-10"),
        ("City Hotel", "0", "100", "FRA", "2015-01-05"),
        ("Resort Hotel", "1", "85", "GBR", "2015-02-11"),
        ("City Hotel", "1", "9000", "DEU", "2015-02-11"),
    ])
}

#[test]
fn ratio_bars_sum_to_retained_rows() {
    let df = sample();
    let reservations = Reservations::from_frame(&df).unwrap();
    let counts = cancellation_counts(&reservations);

    assert_eq!(df.height(), 6);
    assert_eq!(counts.total(), 6);
    assert_eq!(counts.categories, vec!["Not Canceled", "Canceled"]);
    assert_eq!(counts.series[0].values, vec![2, 4]);
}

#[test]
fn shares_sum_to_one_hundred() {
    let reservations = Reservations::from_frame(&sample()).unwrap();
    let shares = cancellation_shares(&reservations);
    let total: f64 = shares.iter().map(|s| s.percent).sum();

    assert_eq!(shares.len(), 2);
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn by_hotel_keeps_first_appearance_order() {
    let reservations = Reservations::from_frame(&sample()).unwrap();
    let counts = cancellation_by_hotel(&reservations);

    assert_eq!(counts.categories, vec!["Resort Hotel", "City Hotel"]);
    assert_eq!(counts.value("Not Canceled", "Resort Hotel"), Some(1));
    assert_eq!(counts.value("Canceled", "Resort Hotel"), Some(2));
    assert_eq!(counts.value("Not Canceled", "City Hotel"), Some(1));
    assert_eq!(counts.value("Canceled", "City Hotel"), Some(2));
}

#[test]
fn rate_trend_averages_per_date() {
    let reservations = Reservations::from_frame(&sample()).unwrap();
    let trend = rate_trend(&reservations);

    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].hotel, HotelType::Resort);
    assert_eq!(trend[1].hotel, HotelType::City);

    let city = &trend[1].points;
    assert_eq!(city.len(), 2);
    assert!(city[0].date < city[1].date);
    assert!((city[0].mean_rate - 95.0).abs() < 1e-9);
    assert!((city[1].mean_rate - 110.0).abs() < 1e-9);
}

#[test]
fn rate_trend_missing_hotel_type_is_empty() {
    let df = cleaned(&[("City Hotel", "0", "80", "PRT", "2016-03-01")]);
    let reservations = Reservations::from_frame(&df).unwrap();
    let trend = rate_trend(&reservations);

    assert!(trend[0].points.is_empty());
    assert_eq!(trend[1].points.len(), 1);
}

#[test]
fn seasonal_months_are_exactly_those_present() {
    let df = sample();
    let counts = seasonal_cancellations(&df).unwrap();

    assert_eq!(counts.categories, vec!["1", "2"]);
    assert_eq!(counts.value("Not Canceled", "1"), Some(2));
    assert_eq!(counts.value("Canceled", "1"), Some(1));
    assert_eq!(counts.value("Not Canceled", "2"), Some(0));
    assert_eq!(counts.value("Canceled", "2"), Some(3));
    // the caller's frame gains no month column
    assert!(df.column("month").is_err());
}

#[test]
fn top_countries_count_canceled_rows_only() {
    let reservations = Reservations::from_frame(&sample()).unwrap();
    let top = top_cancelling_countries(&reservations, 10);

    let labels: Vec<&str> = top.iter().map(|s| s.label.as_str()).collect();
    // FRA only has a non-canceled row
    assert_eq!(labels, vec!["GBR", "PRT", "ESP"]);
    assert_eq!(top[0].count, 2);
    assert_eq!(top.iter().map(|s| s.count).sum::<u64>(), 4);
}

#[test]
fn top_countries_limited_to_ten() {
    let countries = [
        "AAA", "BBB", "CCC", "DDD", "EEE", "FFF", "GGG", "HHH", "III", "JJJ", "KKK", "LLL",
    ];
    let rows: Vec<(&str, &str, &str, &str, &str)> = countries
        .iter()
        .map(|c| ("City Hotel", "1", "50", *c, "2017-05-01"))
        .collect();
    let reservations = Reservations::from_frame(&cleaned(&rows)).unwrap();
    let top = top_cancelling_countries(&reservations, 10);

    assert_eq!(top.len(), 10);
    // equal counts keep first-appearance order
    assert_eq!(top[0].label, "AAA");
    assert_eq!(top[9].label, "JJJ");
    assert!((top.iter().map(|s| s.percent).sum::<f64>() - 100.0).abs() < 1e-9);
}

#[test]
fn dashboard_has_six_panels_in_order() {
    let dashboard = build_dashboard(&sample(), &ReportOptions::default()).unwrap();

    let kinds: Vec<PanelKind> = dashboard.panels.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, PanelKind::ALL.to_vec());
    assert_eq!(dashboard.row_count, 6);
    assert_eq!(dashboard.preview.rows.len(), 5);
    assert!(matches!(dashboard.panels[3].data, PanelData::Line(_)));
}

#[test]
fn dashboard_is_deterministic() {
    let df = sample();
    let first = build_dashboard(&df, &ReportOptions::default()).unwrap();
    let second = build_dashboard(&df, &ReportOptions::default()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn dashboard_serializes_to_json() {
    let df = cleaned(&[
        ("Resort Hotel", "0", "75", "PRT", "2015-07-01"),
        ("City Hotel", "1", "90", "GBR", "2015-07-01"),
        ("City Hotel", "1", "110", "PRT", "2015-08-03"),
        ("Resort Hotel", "0", "85", "ESP", "2015-08-03"),
    ]);
    let dashboard = build_dashboard(&df, &ReportOptions::default()).unwrap();
    let json = serde_json::to_string_pretty(&dashboard).unwrap();

    let parsed: Dashboard = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, dashboard);
    insta::assert_snapshot!(json, @r###"
{
  "title": "Hotel Booking Analysis",
  "row_count": 4,
  "preview": {
    "columns": [
      "hotel",
      "is_canceled",
      "adr",
      "country",
      "reservation_status_date"
    ],
    "rows": [
      [
        "Resort Hotel",
        "0",
        "75",
        "PRT",
        "2015-07-01"
      ],
      [
        "City Hotel",
        "1",
        "90",
        "GBR",
        "2015-07-01"
      ],
      [
        "City Hotel",
        "1",
        "110",
        "PRT",
        "2015-08-03"
      ],
      [
        "Resort Hotel",
        "0",
        "85",
        "ESP",
        "2015-08-03"
      ]
    ]
  },
  "panels": [
    {
      "kind": "cancellation_ratio",
      "heading": "Reservation Cancellation Count",
      "title": "Reservation Status Count",
      "data": {
        "chart": "bar",
        "data": {
          "categories": [
            "Not Canceled",
            "Canceled"
          ],
          "series": [
            {
              "label": "Reservations",
              "values": [
                2,
                2
              ]
            }
          ]
        }
      }
    },
    {
      "kind": "cancellation_percentage",
      "heading": "Reservation Cancellation Percentage",
      "title": "Share of Canceled Reservations",
      "data": {
        "chart": "pie",
        "data": [
          {
            "label": "Not Canceled",
            "count": 2,
            "percent": 50.0
          },
          {
            "label": "Canceled",
            "count": 2,
            "percent": 50.0
          }
        ]
      }
    },
    {
      "kind": "cancellation_by_hotel",
      "heading": "Reservation Status by Hotel Type",
      "title": "Reservation Status by Hotel Type",
      "data": {
        "chart": "grouped_bar",
        "data": {
          "categories": [
            "Resort Hotel",
            "City Hotel"
          ],
          "series": [
            {
              "label": "Not Canceled",
              "values": [
                2,
                0
              ]
            },
            {
              "label": "Canceled",
              "values": [
                0,
                2
              ]
            }
          ]
        }
      }
    },
    {
      "kind": "rate_trend",
      "heading": "Average Daily Rate (ADR) Trend",
      "title": "Average Daily Rate in City and Resort Hotels",
      "data": {
        "chart": "line",
        "data": [
          {
            "hotel": "Resort",
            "points": [
              {
                "date": "2015-07-01",
                "mean_rate": 75.0
              },
              {
                "date": "2015-08-03",
                "mean_rate": 85.0
              }
            ]
          },
          {
            "hotel": "City",
            "points": [
              {
                "date": "2015-07-01",
                "mean_rate": 90.0
              },
              {
                "date": "2015-08-03",
                "mean_rate": 110.0
              }
            ]
          }
        ]
      }
    },
    {
      "kind": "seasonal_cancellation",
      "heading": "Reservation Status per Month",
      "title": "Reservation Status per Month",
      "data": {
        "chart": "grouped_bar",
        "data": {
          "categories": [
            "7",
            "8"
          ],
          "series": [
            {
              "label": "Not Canceled",
              "values": [
                1,
                1
              ]
            },
            {
              "label": "Canceled",
              "values": [
                1,
                1
              ]
            }
          ]
        }
      }
    },
    {
      "kind": "top_cancelling_countries",
      "heading": "Top Countries with Reservation Cancellations",
      "title": "Top Countries with Reservation Cancellations",
      "data": {
        "chart": "pie",
        "data": [
          {
            "label": "GBR",
            "count": 1,
            "percent": 50.0
          },
          {
            "label": "PRT",
            "count": 1,
            "percent": 50.0
          }
        ]
      }
    }
  ]
}
"###);
}
