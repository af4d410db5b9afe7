//! Error handling and enrichment statistics.
//!
//! This module provides:
//! - Error type definitions
//! - Lookup statistics tracking (found, not found, invalid input)
//!
//! Conditions are categorized into:
//! - **Fatal errors** ([`GeoIpError`]): stop the run
//! - **Setup warnings** ([`SetupWarning`]): reported, processing continues
//! - **Lookup outcomes** ([`LookupStatus`]): counted per database, never raised

mod stats;
mod types;

// Re-export public API
pub use stats::EnrichmentStats;
pub use types::{
    ConfigValidationError, GeoIpError, InitializationError, LookupStatus, SetupWarning,
};
