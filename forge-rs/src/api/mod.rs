//! REST API module for forge-rs
//!
//! Provides the HTTP endpoints for registration, login, product generation
//! and the checkout page

pub mod handlers;
pub mod metrics;
pub mod server;
pub mod web;

pub use metrics::Metrics;
pub use server::ApiServer;
