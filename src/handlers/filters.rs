// src/handlers/filters.rs
use chrono::Datelike;
use log::{error, info};
use serde::Serialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use super::sellers::distinct_sellers;
use crate::models::{Region, Sale};
use crate::services::charts::{DEFAULT_TOP_N, MAX_SELLER_COUNT, MIN_SELLER_COUNT};
use crate::services::store::SalesStore;

/// Everything the sidebar needs to draw its controls. The year range is
/// derived from the data itself.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<RegionOption>,
    pub years: Option<YearRange>,
    pub sellers: Vec<String>,
    pub seller_count: SellerCountBounds,
}

#[derive(Debug, Serialize)]
pub struct RegionOption {
    pub slug: String,
    pub label: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Serialize)]
pub struct SellerCountBounds {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

pub fn filter_options(sales: &[Sale]) -> FilterOptions {
    let mut regions = vec![RegionOption {
        slug: String::new(),
        label: "Brasil".to_string(),
    }];
    regions.extend(Region::ALL.iter().map(|r| RegionOption {
        slug: r.slug().to_string(),
        label: r.to_string(),
    }));

    FilterOptions {
        regions,
        years: year_range(sales),
        sellers: distinct_sellers(sales),
        seller_count: SellerCountBounds {
            min: MIN_SELLER_COUNT,
            max: MAX_SELLER_COUNT,
            default: DEFAULT_TOP_N,
        },
    }
}

fn year_range(sales: &[Sale]) -> Option<YearRange> {
    let years = sales.iter().map(|s| s.purchase_date.year());
    match (years.clone().min(), years.max()) {
        (Some(min), Some(max)) => Some(YearRange { min, max }),
        _ => None,
    }
}

pub async fn get_filter_options(store: Arc<SalesStore>) -> Result<Json, Rejection> {
    info!("Handling request for filter options");

    let sales = store.get_sales().await.map_err(|e| {
        error!("Failed to load sales data: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&filter_options(&sales)))
}
