use serde::{Deserialize, Serialize};

/// Reserved identifier for the shared guest account.
///
/// All requests without a resolvable session token draw from this single
/// quota bucket.
pub const GUEST_EMAIL: &str = "guest";

/// A tracked identity with usage and subscription state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Email address (unique key); `GUEST_EMAIL` for the guest account
    pub email: String,
    /// Display name, may be empty
    pub name: String,
    /// Argon2 PHC hash string; empty for the guest account
    pub password_hash: String,
    /// Number of products generated so far
    pub products_count: u32,
    /// Whether the account has an active subscription
    pub is_subscriber: bool,
}

impl Account {
    /// Create a fresh account with zero usage
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        Account {
            email,
            name,
            password_hash,
            products_count: 0,
            is_subscriber: false,
        }
    }

    /// Create the shared guest account
    pub fn guest() -> Self {
        Account {
            email: GUEST_EMAIL.to_string(),
            name: "Guest".to_string(),
            password_hash: String::new(),
            products_count: 0,
            is_subscriber: false,
        }
    }

    /// Whether this is the shared guest account
    pub fn is_guest(&self) -> bool {
        self.email == GUEST_EMAIL
    }

    /// Free generations left under the given quota
    pub fn products_remaining(&self, free_quota: u32) -> u32 {
        free_quota.saturating_sub(self.products_count)
    }
}
