//! UAA Core Components
//!
//! Core infrastructure for UAA requests.

pub mod transport;

pub use transport::*;
