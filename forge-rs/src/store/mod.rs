//! Identity store
//!
//! One record per known identity: registered emails plus the single shared
//! guest account.

pub mod manager;
pub mod types;

pub use manager::AccountStore;
pub use types::{Account, GUEST_EMAIL};
