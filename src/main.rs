use dotenv::dotenv;
use env_logger;
use log::{info, warn};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

mod handlers;
mod models;
mod routes;
mod services;

const DEFAULT_SALES_URL: &str = "https://labdados.com/produtos";
const DEFAULT_CACHE_TTL_SECS: i64 = 600;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize the logger
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let port_str = env::var("PORT").unwrap_or_else(|_| {
        warn!("$PORT not set, defaulting to 3030");
        "3030".to_string()
    });

    let port: u16 = port_str.parse().expect("PORT must be a number");
    info!("Using PORT: {}", port);

    let sales_url = env::var("SALES_API_URL").unwrap_or_else(|_| {
        warn!("$SALES_API_URL not set, defaulting to {}", DEFAULT_SALES_URL);
        DEFAULT_SALES_URL.to_string()
    });

    let ttl_secs: i64 = env::var("SALES_CACHE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_CACHE_TTL_SECS);
    info!("Sales cache TTL: {}s", ttl_secs);

    let store = Arc::new(
        services::store::SalesStore::new(sales_url, ttl_secs)
            .expect("failed to build HTTP client"),
    );

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Will bind to: {}", addr);

    // Set up CORS
    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    // Set up routes
    let api = routes::routes(store).with(cors);
    info!("Routes configured successfully with CORS.");

    // Start the server
    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
}
