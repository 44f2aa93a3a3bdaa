//! forge-rs: account and free-quota metering for DigitalForge
//!
//! A small HTTP service fronting a product-generation endpoint: register
//! and log in users, meter a per-identity free quota, gate generation once
//! the quota is exhausted, and present the subscription checkout page.
//!
//! # Design
//!
//! - **Identity store**: in-memory email -> account mapping, owned
//!   explicitly and passed by handle (no ambient global). Unauthenticated
//!   callers all share one guest account and its quota bucket.
//! - **Access controller**: resolves a session token to an account
//!   (degrading to guest when the token is missing or unresolvable) and
//!   applies the free-quota policy as one atomic check-and-increment.
//! - **Session tokens**: signed, expiring HS256 tokens. An unsigned token
//!   would be forgeable for any known email, so resolution rejects anything
//!   that fails signature or expiry checks.
//! - **Passwords**: salted Argon2 hashes.
//!
//! State lives for the process lifetime only; durability is out of scope.
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`store`]: Identity store
//! - [`access`]: Quota policy and usage decisions
//! - [`session`]: Session token issuance and resolution
//! - [`generator`]: Product text rendering
//! - [`api`]: HTTP surface

pub mod access;
pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{ForgeError, Result};
