//! `schoolpath-enrich`: school record enrichment engine.
//!
//! Builds a name → relationship lookup from the reference CSV, applies it to
//! the school dataset, and writes the result back out as JSON.
//! No CLI dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod model;
pub mod output;

pub use config::EnrichConfig;
pub use engine::{enrich, load_dataset, run};
pub use error::EnrichError;
pub use lookup::LookupTable;
pub use model::{Dataset, EnrichSummary, EntityRecord, RunReport};
pub use output::persist;
