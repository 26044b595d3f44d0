//! Pipeline demo
//!
//! Fetches a few public JSON APIs with a concurrency limit of 5 and prints a summary:
//! - Installing a tracing subscriber once at startup
//! - Creating an engine and subscribing to its events
//! - Running the pipeline and reporting each result
//!
//! ```bash
//! RUST_LOG=info,bounded_fetch=debug cargo run --example run_pipeline
//! ```

use bounded_fetch::{Config, Event, FetchEngine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SAMPLE_URLS: [&str; 3] = [
    "https://api.github.com",
    "https://api.spacexdata.com/v4/launches/latest",
    "https://httpbin.org/get",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The process-wide logging sink; library code only emits through `tracing`
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let engine = FetchEngine::new(Config::with_concurrency_limit(5))?;

    let mut events = engine.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let Event::TaskCompleted { index, url, status } = event {
                println!("  #{index} finished: [{status}] {url}");
            }
        }
    });

    let shutdown = engine.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.shutdown();
        }
    });

    let results = engine.run_pipeline(SAMPLE_URLS).await?;

    println!("\n{}", "=".repeat(50));
    println!("Execution Summary:");
    for result in &results {
        println!("[{}] -> {}", result.status, result.target);
    }
    println!("{}", "=".repeat(50));

    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
