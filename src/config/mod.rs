//! Configuration types.
//!
//! This module provides configuration options for:
//! - [`LogConfig`]: body-excerpt limits for the logging middleware

mod log;

pub use log::{DEFAULT_MAX_BODY_TRACE, LogConfig};
