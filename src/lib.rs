//! # bounded-fetch
//!
//! Bounded-concurrency HTTP fetch pipeline.
//!
//! Given a list of URLs, the engine issues GET requests with a cap on simultaneous
//! in-flight requests, transforms successful JSON responses and returns one status-tagged
//! result per URL, in input order.
//!
//! ## Design Philosophy
//!
//! - **Bounded** - A fixed-capacity gate caps in-flight requests; no rate limiting beyond that
//! - **Total** - Every target yields exactly one result; task failures are values, not errors
//! - **In-memory** - Single-run, no persistence, no retries
//! - **Library-first** - Logs through `tracing`; the embedding binary installs the subscriber
//!
//! ## Quick Start
//!
//! ```no_run
//! use bounded_fetch::{Config, FetchEngine, TaskStatus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = FetchEngine::new(Config::with_concurrency_limit(5))?;
//!
//!     let results = engine
//!         .run_pipeline([
//!             "https://api.github.com",
//!             "https://httpbin.org/get",
//!         ])
//!         .await?;
//!
//!     for result in &results {
//!         match &result.status {
//!             TaskStatus::Success => println!("ok: {}", result.target),
//!             TaskStatus::HttpError(code) => println!("HTTP {code}: {}", result.target),
//!             TaskStatus::Failed(reason) => println!("failed: {} ({reason})", result.target),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Fetch engine: session, task executor and pipeline driver
pub mod engine;
/// Error types
pub mod error;
/// Concurrency gate
pub mod gate;
/// Payload transform applied to successful responses
pub mod transform;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use engine::{FetchEngine, Session};
pub use error::{Error, FetchError, Result};
pub use gate::{ConcurrencyGate, GatePermit};
pub use transform::{CleaningTransform, ENGINE_TAG, PayloadTransform};
pub use types::{Event, Payload, PipelineStats, Target, TaskResult, TaskStatus};

// Cancellation tokens accepted by the `*_with_cancel` methods
pub use tokio_util::sync::CancellationToken;
