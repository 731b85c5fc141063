// src/handlers/report.rs
use log::{error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::{FilterCriteria, Region};
use crate::services::charts::clamp_seller_count;
use crate::services::report::build_report;
use crate::services::store::SalesStore;
use crate::services::filter;

/// Query string of GET /api/v1/report. `sellers` is comma-separated;
/// `region` takes the lowercase macro-region name, with "brasil" (or the
/// parameter's absence) meaning the whole country.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub region: Option<String>,
    pub year: Option<i32>,
    pub sellers: Option<String>,
    pub seller_count: Option<usize>,
}

pub fn criteria_from_query(query: &ReportQuery) -> Result<FilterCriteria, ApiError> {
    let region = match query.region.as_deref() {
        None | Some("") | Some("brasil") => None,
        Some(raw) => Some(
            raw.parse::<Region>()
                .map_err(ApiError::bad_request)?,
        ),
    };

    let sellers = query
        .sellers
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Ok(FilterCriteria {
        region,
        year: query.year,
        sellers,
    })
}

pub async fn get_report(query: ReportQuery, store: Arc<SalesStore>) -> Result<Json, Rejection> {
    info!("Handling report request: {:?}", query);

    let criteria = criteria_from_query(&query).map_err(warp::reject::custom)?;

    let sales = store.get_sales().await.map_err(|e| {
        error!("Failed to load sales data: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    let filtered = filter::apply(sales, &criteria);
    if filtered.is_empty() {
        info!("Filter criteria matched no records; returning empty report");
    }

    let report = build_report(&filtered, clamp_seller_count(query.seller_count));
    Ok(warp::reply::json(&report))
}
