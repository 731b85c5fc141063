// src/services/report.rs
use serde::Serialize;

use crate::models::Sale;
use crate::services::aggregate;
use crate::services::charts::{self, Chart, Metric};
use crate::services::format::format_magnitude;

/// The full dashboard document returned to the frontend: three tabs, each a
/// pair of columns of metric cards and chart specs.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub record_count: u64,
    pub tabs: Vec<TabView>,
}

#[derive(Debug, Serialize)]
pub struct TabView {
    pub title: String,
    pub columns: Vec<Column>,
}

#[derive(Debug, Serialize)]
pub struct Column {
    pub metrics: Vec<MetricCard>,
    pub charts: Vec<Chart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

/// Assemble the report from an already-filtered collection.
///
/// An empty collection is valid input: metrics read zero and every chart
/// comes back with no points, which the frontend renders as empty panels.
pub fn build_report(sales: &[Sale], seller_count: usize) -> DashboardReport {
    let states = aggregate::by_state(sales);
    let months = aggregate::by_month(sales);
    let categories = aggregate::by_category(sales);
    let sellers = aggregate::by_seller(sales);

    let revenue_metric = MetricCard {
        label: "Receita".to_string(),
        value: format_magnitude(aggregate::total_revenue(sales), "R$"),
    };
    let count_metric = MetricCard {
        label: "Quantidade de vendas".to_string(),
        value: format_magnitude(sales.len() as f64, ""),
    };

    let revenue_tab = TabView {
        title: "Receita".to_string(),
        columns: vec![
            Column {
                metrics: vec![revenue_metric.clone()],
                charts: vec![
                    charts::state_map(&states, Metric::Revenue),
                    charts::top_states_bar(&states, Metric::Revenue, charts::DEFAULT_TOP_N),
                ],
            },
            Column {
                metrics: vec![count_metric.clone()],
                charts: vec![
                    charts::monthly_line(&months, Metric::Revenue),
                    charts::category_bar(&categories, Metric::Revenue),
                ],
            },
        ],
    };

    // Count-based mirror of the revenue tab.
    let volume_tab = TabView {
        title: "Quantidade de vendas".to_string(),
        columns: vec![
            Column {
                metrics: vec![revenue_metric.clone()],
                charts: vec![
                    charts::state_map(&states, Metric::Count),
                    charts::top_states_bar(&states, Metric::Count, charts::DEFAULT_TOP_N),
                ],
            },
            Column {
                metrics: vec![count_metric.clone()],
                charts: vec![
                    charts::monthly_line(&months, Metric::Count),
                    charts::category_bar(&categories, Metric::Count),
                ],
            },
        ],
    };

    let sellers_tab = TabView {
        title: "Vendedores".to_string(),
        columns: vec![
            Column {
                metrics: vec![revenue_metric],
                charts: vec![charts::top_sellers_bar(
                    &sellers,
                    Metric::Revenue,
                    seller_count,
                )],
            },
            Column {
                metrics: vec![count_metric],
                charts: vec![charts::top_sellers_bar(
                    &sellers,
                    Metric::Count,
                    seller_count,
                )],
            },
        ],
    };

    DashboardReport {
        record_count: sales.len() as u64,
        tabs: vec![revenue_tab, volume_tab, sellers_tab],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sale(date: (i32, u32, u32), state: &str, seller: &str, price: f64) -> Sale {
        Sale {
            purchase_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            price,
            state: state.to_string(),
            lat: -15.0,
            lon: -47.0,
            category: "livros".to_string(),
            seller: seller.to_string(),
        }
    }

    #[test]
    fn test_report_has_three_tabs_with_two_columns() {
        let sales = vec![
            sale((2021, 1, 5), "São Paulo", "Ana", 100.0),
            sale((2021, 2, 5), "Bahia", "Beto", 200.0),
        ];
        let report = build_report(&sales, 5);
        assert_eq!(report.record_count, 2);
        assert_eq!(report.tabs.len(), 3);
        assert_eq!(report.tabs[0].title, "Receita");
        assert_eq!(report.tabs[1].title, "Quantidade de vendas");
        assert_eq!(report.tabs[2].title, "Vendedores");
        for tab in &report.tabs {
            assert_eq!(tab.columns.len(), 2);
        }
        // Volume tab mirrors the revenue tab's chart count.
        assert_eq!(report.tabs[1].columns[0].charts.len(), 2);
        assert_eq!(report.tabs[1].columns[1].charts.len(), 2);
    }

    #[test]
    fn test_metrics_are_formatted() {
        let sales = vec![sale((2021, 1, 5), "São Paulo", "Ana", 1500.0)];
        let report = build_report(&sales, 5);
        let revenue = &report.tabs[0].columns[0].metrics[0];
        assert_eq!(revenue.label, "Receita");
        assert_eq!(revenue.value, "R$ 1.50 thousand");
        let count = &report.tabs[0].columns[1].metrics[0];
        assert_eq!(count.value, " 1.00 ");
    }

    #[test]
    fn test_empty_collection_builds_zeroed_report() {
        let report = build_report(&[], 5);
        assert_eq!(report.record_count, 0);
        assert_eq!(report.tabs.len(), 3);
        let revenue = &report.tabs[0].columns[0].metrics[0];
        assert_eq!(revenue.value, "R$ 0.00 ");
    }

    #[test]
    fn test_report_serializes_to_json() {
        let sales = vec![sale((2021, 1, 5), "São Paulo", "Ana", 100.0)];
        let report = build_report(&sales, 5);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tabs"][0]["columns"][0]["charts"][0]["kind"], "geo_scatter");
    }
}
