//! UAA Types
//!
//! Configuration and token definitions.

pub mod config;
pub mod token;

pub use config::*;
pub use token::*;
