//! Author Metrics
//!
//! A read-only lookup and report service over yearly author bibliometric
//! tables. Given a researcher's name and country it finds the matching row in
//! each year, disambiguates namesakes, and reports publications, citations,
//! h-index, self-citation rate and field per year with a short narrative.
//!
//! # Features
//!
//! - **Per-year schemas**: inconsistent column names across years are mapped
//!   and validated when the tables load
//! - **Explicit ambiguity**: namesakes are reported with candidates, never
//!   silently picked
//! - **Immutable snapshot**: tables load once and are shared read-only
//!
//! # Example
//!
//! ```no_run
//! use author_metrics::{Config, DatasetStore, analysis, models::GenerateAnalysisRequest};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let store = DatasetStore::load(&config)?;
//!
//!     let request: GenerateAnalysisRequest = serde_json::from_str(
//!         r#"{"first_name": "Jane", "last_name": "Doe", "cntry": "china"}"#,
//!     )?;
//!     let report = analysis::generate_analysis(&store, &request)?;
//!     println!("{}", report.analysis.len());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod models;
pub mod normalize;
pub mod resolver;
pub mod server;

pub use config::Config;
pub use dataset::{DatasetLoader, DatasetStore};
pub use error::{AnalysisError, LoadError};
