//! Command configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, file naming, field-name rules)
//! - CLI option types and parsing
//! - Option validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, EventFormat, LogFormat, LogLevel};
