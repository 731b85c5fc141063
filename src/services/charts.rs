// src/services/charts.rs
use serde::Serialize;
use std::cmp::Ordering;

use crate::services::aggregate::{CategoryAgg, MonthAgg, SellerAgg, StateAgg};

/// Default number of entries in the "top N" bar charts.
pub const DEFAULT_TOP_N: usize = 5;

/// Bounds for the seller leaderboard size control.
pub const MIN_SELLER_COUNT: usize = 2;
pub const MAX_SELLER_COUNT: usize = 10;

/// Which of the two bucket measures a chart displays. Revenue charts sum
/// price; volume charts count transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Revenue,
    Count,
}

impl Metric {
    fn axis_title(&self) -> &'static str {
        match self {
            Metric::Revenue => "Receita",
            Metric::Count => "Quantidade de vendas",
        }
    }
}

/// A declarative chart description for the frontend to render. Carries no
/// data beyond what the aggregate tables already hold.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    GeoScatter(GeoScatterChart),
    Line(LineChart),
    Bar(BarChart),
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoScatterChart {
    pub title: String,
    /// Map scope hint, e.g. "south america".
    pub scope: String,
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoPoint {
    /// Hover name (the state).
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Marker size driver: the metric value for this state.
    pub size: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineChart {
    pub title: String,
    pub y_title: String,
    pub markers: bool,
    /// Lower y bound is pinned at zero; this is the upper bound.
    pub y_max: f64,
    /// One series per year; series are color- and dash-coded by label.
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSeries {
    /// The year, used for both the legend and the dash encoding.
    pub label: String,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinePoint {
    /// Month name on the x axis.
    pub x: String,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarChart {
    pub title: String,
    pub y_title: String,
    pub orientation: Orientation,
    /// Print the value on each bar.
    pub value_labels: bool,
    pub bars: Vec<BarEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarEntry {
    pub label: String,
    pub value: f64,
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Clamp the requested leaderboard size to the control's bounds.
pub fn clamp_seller_count(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_TOP_N)
        .clamp(MIN_SELLER_COUNT, MAX_SELLER_COUNT)
}

/// Map of per-state totals, marker size = metric value.
pub fn state_map(states: &[StateAgg], metric: Metric) -> Chart {
    let title = match metric {
        Metric::Revenue => "Receita por estado",
        Metric::Count => "Vendas por estado",
    };
    Chart::GeoScatter(GeoScatterChart {
        title: title.to_string(),
        scope: "south america".to_string(),
        points: states
            .iter()
            .map(|s| GeoPoint {
                name: s.state.clone(),
                lat: s.lat,
                lon: s.lon,
                size: metric_of_state(s, metric),
            })
            .collect(),
    })
}

/// Monthly line chart, one series per calendar year.
pub fn monthly_line(months: &[MonthAgg], metric: Metric) -> Chart {
    let title = match metric {
        Metric::Revenue => "Receita mensal",
        Metric::Count => "Quantidade de vendas mensal",
    };

    let mut series: Vec<LineSeries> = Vec::new();
    let mut y_max: f64 = 0.0;

    for m in months {
        let value = metric_of_month(m, metric);
        y_max = y_max.max(value);

        let label = m.year.to_string();
        match series.iter_mut().find(|s| s.label == label) {
            Some(s) => s.points.push(LinePoint {
                x: m.month_name.clone(),
                y: value,
            }),
            None => series.push(LineSeries {
                label,
                points: vec![LinePoint {
                    x: m.month_name.clone(),
                    y: value,
                }],
            }),
        }
    }

    Chart::Line(LineChart {
        title: title.to_string(),
        y_title: metric.axis_title().to_string(),
        markers: true,
        y_max,
        series,
    })
}

/// Top-N states bar chart, sorted descending by the displayed metric.
pub fn top_states_bar(states: &[StateAgg], metric: Metric, n: usize) -> Chart {
    let title = match metric {
        Metric::Revenue => "Top estados (receita)",
        Metric::Count => "Top estados (quantidade de vendas)",
    };
    let mut rows: Vec<(&StateAgg, f64)> = states
        .iter()
        .map(|s| (s, metric_of_state(s, metric)))
        .collect();
    rows.sort_by(|a, b| desc(a.1, b.1));

    Chart::Bar(BarChart {
        title: title.to_string(),
        y_title: metric.axis_title().to_string(),
        orientation: Orientation::Vertical,
        value_labels: true,
        bars: rows
            .into_iter()
            .take(n)
            .map(|(s, value)| BarEntry {
                label: s.state.clone(),
                value,
            })
            .collect(),
    })
}

/// Per-category bar chart; categories arrive pre-sorted by revenue, but the
/// volume view re-sorts by count.
pub fn category_bar(categories: &[CategoryAgg], metric: Metric) -> Chart {
    let title = match metric {
        Metric::Revenue => "Receita por categoria",
        Metric::Count => "Vendas por categoria",
    };
    let mut rows: Vec<(&CategoryAgg, f64)> = categories
        .iter()
        .map(|c| (c, metric_of_category(c, metric)))
        .collect();
    rows.sort_by(|a, b| desc(a.1, b.1));

    Chart::Bar(BarChart {
        title: title.to_string(),
        y_title: metric.axis_title().to_string(),
        orientation: Orientation::Vertical,
        value_labels: true,
        bars: rows
            .into_iter()
            .map(|(c, value)| BarEntry {
                label: c.category.clone(),
                value,
            })
            .collect(),
    })
}

/// Seller leaderboard: top `n` sellers by the displayed metric, horizontal
/// bars. Ties keep first-encountered order (stable sort over the table's
/// first-seen ordering).
pub fn top_sellers_bar(sellers: &[SellerAgg], metric: Metric, n: usize) -> Chart {
    let title = match metric {
        Metric::Revenue => format!("Top {} vendedores (receita)", n),
        Metric::Count => format!("Top {} vendedores (quantidade de vendas)", n),
    };
    let mut rows: Vec<(&SellerAgg, f64)> = sellers
        .iter()
        .map(|s| (s, metric_of_seller(s, metric)))
        .collect();
    rows.sort_by(|a, b| desc(a.1, b.1));

    Chart::Bar(BarChart {
        title,
        y_title: metric.axis_title().to_string(),
        orientation: Orientation::Horizontal,
        value_labels: true,
        bars: rows
            .into_iter()
            .take(n)
            .map(|(s, value)| BarEntry {
                label: s.seller.clone(),
                value,
            })
            .collect(),
    })
}

fn metric_of_state(s: &StateAgg, metric: Metric) -> f64 {
    match metric {
        Metric::Revenue => s.revenue,
        Metric::Count => s.sales as f64,
    }
}

fn metric_of_month(m: &MonthAgg, metric: Metric) -> f64 {
    match metric {
        Metric::Revenue => m.revenue,
        Metric::Count => m.sales as f64,
    }
}

fn metric_of_category(c: &CategoryAgg, metric: Metric) -> f64 {
    match metric {
        Metric::Revenue => c.revenue,
        Metric::Count => c.sales as f64,
    }
}

fn metric_of_seller(s: &SellerAgg, metric: Metric) -> f64 {
    match metric {
        Metric::Revenue => s.revenue,
        Metric::Count => s.sales as f64,
    }
}
