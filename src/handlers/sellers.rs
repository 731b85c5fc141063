// src/handlers/sellers.rs
use log::{error, info};
use std::collections::BTreeSet;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::Sale;
use crate::services::store::SalesStore;

/// Distinct seller names, sorted, for the multi-select control.
pub fn distinct_sellers(sales: &[Sale]) -> Vec<String> {
    sales
        .iter()
        .map(|s| s.seller.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub async fn get_sellers(store: Arc<SalesStore>) -> Result<Json, Rejection> {
    info!("Handling request for seller list");

    let sales = store.get_sales().await.map_err(|e| {
        error!("Failed to load sales data: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&distinct_sellers(&sales)))
}
