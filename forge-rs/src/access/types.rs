use serde::{Deserialize, Serialize};

/// Free product generations allowed before a subscription is required
pub const FREE_QUOTA: u32 = 3;

/// Reason a usage request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenyReason {
    /// Free tier used up and no subscription
    QuotaExhausted,
}

/// Outcome of a usage request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageDecision {
    /// Request granted; the account's usage counter was incremented
    Allowed {
        /// Free generations left after this one (0 for subscribers past quota)
        remaining: u32,
        /// Whether the account is a subscriber
        is_subscriber: bool,
    },
    /// Request refused; no state was mutated
    Denied {
        /// Why the request was refused
        reason: DenyReason,
    },
}

impl UsageDecision {
    /// Whether the request was granted
    pub fn is_allowed(&self) -> bool {
        matches!(self, UsageDecision::Allowed { .. })
    }
}
