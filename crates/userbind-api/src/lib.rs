//! # userbind-api
//!
//! HTTP server built with Axum: student binding pages, the forced-binding
//! gate and the view hooks, on top of a minimal account surface.

pub mod extractors;
pub mod handlers;
pub mod hooks;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
