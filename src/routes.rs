// src/routes.rs
use std::sync::Arc;
use warp::reject::Rejection;

use crate::handlers::{
    filters::get_filter_options, report::get_report, report::ReportQuery, sellers::get_sellers,
};
use crate::services::store::SalesStore;
use log::info;

use crate::handlers::error::ApiError;
use std::convert::Infallible;
use warp::{Filter, Reply};

// Recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid query string".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    store: Arc<SalesStore>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let store_filter = warp::any().map(move || store.clone());

    let report_route = warp::path!("api" / "v1" / "report")
        .and(warp::get())
        .and(warp::query::<ReportQuery>())
        .and(store_filter.clone())
        .and_then(get_report);

    let sellers_route = warp::path!("api" / "v1" / "sellers")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_sellers);

    let filters_route = warp::path!("api" / "v1" / "filters")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_filter_options);

    info!("All routes configured successfully.");

    report_route
        .or(sellers_route)
        .or(filters_route)
        .recover(handle_rejection)
}
