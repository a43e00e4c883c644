use beasts::{CategoryScraper, Result, ScraperConfig, FILE_PATH};
use chrono::Local;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let start_time = Local::now();

    let mut scraper = CategoryScraper::new(ScraperConfig::default());
    scraper.run().await?;
    scraper.save_to_csv(FILE_PATH).await?;

    println!("Total entries: {}", scraper.total_entries());

    let run_time = (Local::now() - start_time)
        .num_microseconds()
        .map(|n| n as f64 / 1_000_000.0)
        .unwrap_or(0.0);
    info!("Full program time: {run_time} sec");

    Ok(())
}
