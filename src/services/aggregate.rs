// src/services/aggregate.rs
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::models::Sale;

/// Revenue and sale count for one state, with the state's first-seen
/// coordinates for the map charts.
#[derive(Debug, Clone, Serialize)]
pub struct StateAgg {
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    pub revenue: f64,
    pub sales: u64,
}

/// One (year, month) bucket. Buckets are keyed by year AND month, so the same
/// calendar month in two years never collapses into one point.
#[derive(Debug, Clone, Serialize)]
pub struct MonthAgg {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub revenue: f64,
    pub sales: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryAgg {
    pub category: String,
    pub revenue: f64,
    pub sales: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SellerAgg {
    pub seller: String,
    pub revenue: f64,
    pub sales: u64,
}

fn desc_by_revenue(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Group by state, summing price and counting records. Sorted descending by
/// revenue; sort_by is stable so ties keep first-seen order.
pub fn by_state(sales: &[Sale]) -> Vec<StateAgg> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<StateAgg> = Vec::new();

    for sale in sales {
        match index.get(sale.state.as_str()) {
            Some(&i) => {
                rows[i].revenue += sale.price;
                rows[i].sales += 1;
            }
            None => {
                index.insert(sale.state.as_str(), rows.len());
                rows.push(StateAgg {
                    state: sale.state.clone(),
                    lat: sale.lat,
                    lon: sale.lon,
                    revenue: sale.price,
                    sales: 1,
                });
            }
        }
    }

    rows.sort_by(|a, b| desc_by_revenue(a.revenue, b.revenue));
    rows
}

/// Group by (year, month), summing price and counting records, in
/// chronological order with the English month name attached.
pub fn by_month(sales: &[Sale]) -> Vec<MonthAgg> {
    let mut buckets: BTreeMap<(i32, u32), (f64, u64)> = BTreeMap::new();

    for sale in sales {
        let key = (sale.purchase_date.year(), sale.purchase_date.month());
        let bucket = buckets.entry(key).or_insert((0.0, 0));
        bucket.0 += sale.price;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), (revenue, sales))| MonthAgg {
            year,
            month,
            month_name: month_name(year, month),
            revenue,
            sales,
        })
        .collect()
}

fn month_name(year: i32, month: u32) -> String {
    // from_ymd_opt only fails on an out-of-range month, which the grouping
    // key (taken from a valid NaiveDate) cannot produce.
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_default()
}

/// Group by product category, summing price and counting records, sorted
/// descending by revenue.
pub fn by_category(sales: &[Sale]) -> Vec<CategoryAgg> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<CategoryAgg> = Vec::new();

    for sale in sales {
        match index.get(sale.category.as_str()) {
            Some(&i) => {
                rows[i].revenue += sale.price;
                rows[i].sales += 1;
            }
            None => {
                index.insert(sale.category.as_str(), rows.len());
                rows.push(CategoryAgg {
                    category: sale.category.clone(),
                    revenue: sale.price,
                    sales: 1,
                });
            }
        }
    }

    rows.sort_by(|a, b| desc_by_revenue(a.revenue, b.revenue));
    rows
}

/// Per-seller revenue sum and sale count, in first-seen order. Chart builders
/// sort by whichever metric they display before truncating to top N.
pub fn by_seller(sales: &[Sale]) -> Vec<SellerAgg> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<SellerAgg> = Vec::new();

    for sale in sales {
        match index.get(sale.seller.as_str()) {
            Some(&i) => {
                rows[i].revenue += sale.price;
                rows[i].sales += 1;
            }
            None => {
                index.insert(sale.seller.as_str(), rows.len());
                rows.push(SellerAgg {
                    seller: sale.seller.clone(),
                    revenue: sale.price,
                    sales: 1,
                });
            }
        }
    }

    rows
}

pub fn total_revenue(sales: &[Sale]) -> f64 {
    // `Sum` for f64 uses -0.0 as its identity, so an empty slice would
    // format as "-0.00"; fold from +0.0 instead.
    sales.iter().fold(0.0, |acc, s| acc + s.price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(date: (i32, u32, u32), state: &str, category: &str, seller: &str, price: f64) -> Sale {
        Sale {
            purchase_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            price,
            state: state.to_string(),
            lat: -10.0,
            lon: -50.0,
            category: category.to_string(),
            seller: seller.to_string(),
        }
    }

    fn sample() -> Vec<Sale> {
        vec![
            sale((2020, 3, 1), "São Paulo", "livros", "Ana", 100.0),
            sale((2020, 3, 15), "Bahia", "eletrônicos", "Beto", 250.0),
            sale((2021, 3, 2), "São Paulo", "livros", "Ana", 50.0),
            sale((2021, 4, 9), "Bahia", "livros", "Caio", 300.0),
        ]
    }

    #[test]
    fn test_totals_are_conserved_across_groupings() {
        let sales = sample();
        let total = total_revenue(&sales);
        let state_total: f64 = by_state(&sales).iter().map(|s| s.revenue).sum();
        let category_total: f64 = by_category(&sales).iter().map(|c| c.revenue).sum();
        let seller_total: f64 = by_seller(&sales).iter().map(|s| s.revenue).sum();
        let month_total: f64 = by_month(&sales).iter().map(|m| m.revenue).sum();

        assert_eq!(total, 700.0);
        assert_eq!(state_total, total);
        assert_eq!(category_total, total);
        assert_eq!(seller_total, total);
        assert_eq!(month_total, total);

        let count: u64 = by_state(&sales).iter().map(|s| s.sales).sum();
        assert_eq!(count, sales.len() as u64);
    }

    #[test]
    fn test_by_state_sorted_descending_with_coordinates() {
        let states = by_state(&sample());
        assert_eq!(states[0].state, "Bahia");
        assert_eq!(states[0].revenue, 550.0);
        assert_eq!(states[1].state, "São Paulo");
        assert_eq!(states[1].revenue, 150.0);
        assert_eq!(states[0].lat, -10.0);
    }

    #[test]
    fn test_by_state_ties_keep_first_seen_order() {
        let sales = vec![
            sale((2020, 1, 1), "Ceará", "livros", "Ana", 100.0),
            sale((2020, 1, 2), "Goiás", "livros", "Ana", 100.0),
        ];
        let states = by_state(&sales);
        assert_eq!(states[0].state, "Ceará");
        assert_eq!(states[1].state, "Goiás");
    }

    #[test]
    fn test_by_month_keys_on_year_and_month() {
        let months = by_month(&sample());
        // March 2020 and March 2021 must stay distinct buckets.
        assert_eq!(months.len(), 3);
        assert_eq!((months[0].year, months[0].month), (2020, 3));
        assert_eq!((months[1].year, months[1].month), (2021, 3));
        assert_eq!((months[2].year, months[2].month), (2021, 4));
        assert_eq!(months[0].month_name, "March");
        assert_eq!(months[2].month_name, "April");
        assert_eq!(months[0].revenue, 350.0);
        assert_eq!(months[0].sales, 2);
    }

    #[test]
    fn test_by_seller_sum_and_count() {
        let sellers = by_seller(&sample());
        assert_eq!(sellers.len(), 3);
        // First-seen order, not sorted.
        assert_eq!(sellers[0].seller, "Ana");
        assert_eq!(sellers[0].revenue, 150.0);
        assert_eq!(sellers[0].sales, 2);
        assert_eq!(sellers[2].seller, "Caio");
        assert_eq!(sellers[2].sales, 1);
    }

    #[test]
    fn test_empty_input_yields_empty_aggregates() {
        let empty: Vec<Sale> = Vec::new();
        assert!(by_state(&empty).is_empty());
        assert!(by_month(&empty).is_empty());
        assert!(by_category(&empty).is_empty());
        assert!(by_seller(&empty).is_empty());
        assert_eq!(total_revenue(&empty), 0.0);
    }
}
