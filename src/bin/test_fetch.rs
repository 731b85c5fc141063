use anyhow::Result;
use dotenv::dotenv;
use log::info;
use std::collections::HashMap;
use std::env;

use sales_dashboard_api::models::Region;
use sales_dashboard_api::services::aggregate;
use sales_dashboard_api::services::format::format_magnitude;
use sales_dashboard_api::services::sales;

/// Debug tool: fetch the dataset once and print a summary.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let url = env::var("SALES_API_URL").unwrap_or_else(|_| "https://labdados.com/produtos".to_string());
    info!("Fetching sales data from {}", url);

    let client = sales::http_client()?;
    let data = sales::fetch_sales(&client, &url).await?;

    println!("Records: {}", data.len());
    println!(
        "Total revenue: {}",
        format_magnitude(aggregate::total_revenue(&data), "R$")
    );

    let mut by_region: HashMap<&'static str, f64> = HashMap::new();
    for sale in &data {
        let key = Region::of_state(&sale.state).map(|r| r.slug()).unwrap_or("?");
        *by_region.entry(key).or_insert(0.0) += sale.price;
    }

    println!("Revenue by region:");
    let mut rows: Vec<_> = by_region.into_iter().collect();
    rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    for (region, revenue) in rows {
        println!("  {:<14} {}", region, format_magnitude(revenue, "R$"));
    }

    Ok(())
}
