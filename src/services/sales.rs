// src/services/sales.rs
use chrono::NaiveDate;
use log::{error, info};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

use crate::models::{RawSale, Sale};

/// Upstream date format, e.g. "07/11/2021".
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Upstream request timeout; a hung fetch must not stall renders forever.
const FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub enum SalesError {
    /// Network/HTTP failure or a payload that is not a JSON array of records.
    Fetch(String),
    /// A record field that does not match the expected shape, e.g. a date
    /// outside DD/MM/YYYY.
    Parse(String),
}

impl fmt::Display for SalesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SalesError::Fetch(msg) => write!(f, "fetch error: {}", msg),
            SalesError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for SalesError {}

pub fn http_client() -> Result<Client, SalesError> {
    Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| SalesError::Fetch(e.to_string()))
}

/// Fetch the full sales dataset from the upstream endpoint.
///
/// Region/year narrowing is deliberately NOT forwarded upstream: the whole
/// dataset is fetched once and filtered in memory, which is what lets the
/// store memoize it across requests.
pub async fn fetch_sales(client: &Client, url: &str) -> Result<Vec<Sale>, SalesError> {
    info!("Fetching sales data from URL: {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SalesError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        error!("Upstream returned status: {}", response.status());
        return Err(SalesError::Fetch(format!(
            "upstream returned status {}",
            response.status()
        )));
    }

    let raw: Vec<RawSale> = response
        .json()
        .await
        .map_err(|e| SalesError::Fetch(e.to_string()))?;

    let sales = parse_sales(raw)?;
    info!("Fetched {} sale records", sales.len());
    Ok(sales)
}

/// Convert raw upstream records into typed sales, preserving arrival order.
pub fn parse_sales(raw: Vec<RawSale>) -> Result<Vec<Sale>, SalesError> {
    raw.into_iter()
        .map(|r| {
            let purchase_date = NaiveDate::parse_from_str(&r.purchase_date, DATE_FORMAT)
                .map_err(|e| {
                    SalesError::Parse(format!("bad purchase date '{}': {}", r.purchase_date, e))
                })?;
            Ok(Sale {
                purchase_date,
                price: r.price,
                state: r.state,
                lat: r.lat,
                lon: r.lon,
                category: r.category,
                seller: r.seller,
            })
        })
        .collect()
}
