pub mod models;
pub mod error;
pub mod config;
pub mod parsers;
pub mod engine;
pub mod auth;
pub mod verdict;
pub mod mutator;
pub mod response_analysis;
pub mod extraction;
pub mod prober;
pub mod scan;
pub mod reporting;

// Re-export commonly used items
pub use models::*;
pub use error::ScanError;
pub use config::{ProbeSettings, ScanConfig};
pub use parsers::*;
pub use engine::{AttackEngine, ProbeResponse};
pub use auth::*;
pub use verdict::*;
pub use prober::probe_target;
pub use scan::{run_scan, run_scan_with_engine};
pub use reporting::*;
