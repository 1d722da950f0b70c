//! Integration test utilities for the userbind server
//!
//! Runs the full router over in-memory repositories and drives it with a
//! real HTTP client.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
