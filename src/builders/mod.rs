//! Builders
//!
//! Fluent builder patterns for UAA configuration.

pub mod config;

pub use config::{uaa_config, UaaConfigBuilder};
