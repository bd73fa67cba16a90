//! Integration tests for wiretap.
//!
//! These tests are hermetic: HTTP traffic goes to an in-process wiremock
//! server, and sender-level scenarios use the scripted `MockSender`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # Run with verbose output
//! cargo test --test integration -- --nocapture
//! ```

mod common;
mod logging_tests;
mod transport_tests;
