//! # ragserve
//!
//! Simulator for an adaptive retrieval-augmented-generation serving
//! pipeline. Each request checks an LRU retrieval cache, overlaps a
//! cache-miss ANN lookup with a concurrent draft step, assembles a
//! token-budgeted context through a second LRU fragment cache, and runs a
//! simulated generation step. Per-request latencies feed a threshold tuner
//! that picks the next request's serving knobs.
//!
//! ## Example
//!
//! ```no_run
//! use ragserve::{Pipeline, ServeConfig, select_knobs};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut pipeline = Pipeline::new(ServeConfig::default())?;
//!
//!     let knobs = select_knobs(40.0, 8.0, 18.0);
//!     let served = pipeline.serve("what is rag latency?", &knobs).await?;
//!
//!     println!("{}", served.answer);
//!     println!("e2e: {:.1}ms", served.timings.e2e_ms);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod retrieval;
pub mod tuner;

// Re-export main types for convenience
pub use cache::{CacheStats, DocId, LruCache};
pub use config::{ServeConfig, ServeConfigBuilder};
pub use error::{RagError, Result};
pub use pipeline::{Pipeline, Served, Timings};
pub use tuner::{select_knobs, Knobs};
