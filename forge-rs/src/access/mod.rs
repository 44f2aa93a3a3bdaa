//! Access control
//!
//! Quota policy: every identity gets `FREE_QUOTA` product generations;
//! subscribers are unmetered.

pub mod controller;
pub mod types;

pub use controller::AccessController;
pub use types::{DenyReason, UsageDecision, FREE_QUOTA};
