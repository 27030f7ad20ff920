//! # Yatube Web
//!
//! The actix-web application: routes, request extractors, page rendering
//! and startup wiring. The `yatube` binary serves it; integration tests
//! build it in-process.

pub mod config;
pub mod fixtures;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod state;
pub mod telemetry;
pub mod urls;
pub mod views;

pub use config::{AppConfig, Settings};
pub use handlers::configure_routes;
pub use state::AppState;
