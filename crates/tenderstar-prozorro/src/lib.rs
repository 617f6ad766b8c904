//! Tenderstar Prozorro - procurement contracts into a star schema
//!
//! Lists contracts from the openprocurement API, enriches each with its
//! tender document, and writes one fact table plus dimension tables as CSV.
//!
//! # Example
//!
//! ```no_run
//! use tenderstar_core::ProgressContext;
//! use tenderstar_prozorro::{Config, run};
//!
//! let config = Config {
//!     max_pages: Some(1),
//!     ..Default::default()
//! };
//!
//! let summary = run(&config, &ProgressContext::new()).expect("Pipeline failed");
//! println!("Wrote {} fact rows", summary.tables.facts);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod runner;
pub mod star;
pub mod tables;

// Re-exports for convenience
pub use api::{HttpTransport, Transport};
pub use config::Config;
pub use error::{DecodeError, EnrichError, FetchFailure};
pub use runner::{RunSummary, run, run_with};
pub use star::StarSchema;
