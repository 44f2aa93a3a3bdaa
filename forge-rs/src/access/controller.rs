//! Access controller
//!
//! Resolves a caller to an account and enforces the free-tier quota.

use std::sync::Arc;
use tracing::{debug, warn};

use super::types::{DenyReason, UsageDecision};
use crate::session::SessionTokens;
use crate::store::{AccountStore, GUEST_EMAIL};

/// Quota policy enforcement over the account store
pub struct AccessController {
    store: Arc<AccountStore>,
    tokens: SessionTokens,
    free_quota: u32,
}

impl AccessController {
    /// Create a controller over the given store
    pub fn new(store: Arc<AccountStore>, tokens: SessionTokens, free_quota: u32) -> Self {
        AccessController {
            store,
            tokens,
            free_quota,
        }
    }

    /// Resolve a session token to an account email
    ///
    /// Falls back to the shared guest identity when the token is missing,
    /// malformed, expired, or names an account no longer in the store.
    /// Resolution never fails the request.
    pub async fn resolve_identity(&self, token: Option<&str>) -> String {
        let Some(token) = token else {
            return GUEST_EMAIL.to_string();
        };

        match self.tokens.resolve(token) {
            Some(email) if self.store.contains(&email).await => email,
            Some(email) => {
                warn!("Token for unknown account {}, serving as guest", email);
                GUEST_EMAIL.to_string()
            }
            None => {
                debug!("Unresolvable session token, serving as guest");
                GUEST_EMAIL.to_string()
            }
        }
    }

    /// Decide a usage-consuming request
    ///
    /// Non-subscribers at or past the free quota are denied without
    /// mutation. Everyone else has their counter incremented and is allowed;
    /// subscribers are never denied. Check and increment run as one atomic
    /// store update, so concurrent requests cannot oversell the quota.
    pub async fn request_usage(&self, token: Option<&str>) -> UsageDecision {
        let email = self.resolve_identity(token).await;
        if email == GUEST_EMAIL {
            self.store.get_or_create_guest().await;
        }

        let free_quota = self.free_quota;
        let decision = self
            .store
            .update(&email, |account| {
                if !account.is_subscriber && account.products_count >= free_quota {
                    return UsageDecision::Denied {
                        reason: DenyReason::QuotaExhausted,
                    };
                }

                account.products_count += 1;
                UsageDecision::Allowed {
                    remaining: account.products_remaining(free_quota),
                    is_subscriber: account.is_subscriber,
                }
            })
            .await;

        // The account cannot disappear between resolution and update, but
        // the lookup is still fallible; treat a miss as an exhausted guest.
        decision.unwrap_or(UsageDecision::Denied {
            reason: DenyReason::QuotaExhausted,
        })
    }

    /// Free quota this controller enforces
    pub fn free_quota(&self) -> u32 {
        self.free_quota
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::types::FREE_QUOTA;

    fn controller(store: Arc<AccountStore>) -> AccessController {
        AccessController::new(
            store,
            SessionTokens::new("test-secret".to_string(), 1),
            FREE_QUOTA,
        )
    }

    #[tokio::test]
    async fn test_fresh_account_quota_sequence() {
        let store = Arc::new(AccountStore::new());
        store.register("A", "a@x.com", "pw").await.unwrap();

        let access = controller(store.clone());
        let token = access.tokens.issue("a@x.com").unwrap();

        // First three calls allowed with remaining 2, 1, 0
        for expected in [2u32, 1, 0] {
            let decision = access.request_usage(Some(&token)).await;
            assert_eq!(
                decision,
                UsageDecision::Allowed {
                    remaining: expected,
                    is_subscriber: false
                }
            );
        }

        // Fourth call denied, counter unchanged
        let decision = access.request_usage(Some(&token)).await;
        assert_eq!(
            decision,
            UsageDecision::Denied {
                reason: DenyReason::QuotaExhausted
            }
        );
        assert_eq!(store.get("a@x.com").await.unwrap().products_count, 3);
    }

    #[tokio::test]
    async fn test_subscriber_never_denied() {
        let store = Arc::new(AccountStore::new());
        store.register("A", "a@x.com", "pw").await.unwrap();
        store.confirm_subscription("a@x.com").await.unwrap();
        store
            .update("a@x.com", |account| account.products_count = 10)
            .await
            .unwrap();

        let access = controller(store.clone());
        let token = access.tokens.issue("a@x.com").unwrap();

        let decision = access.request_usage(Some(&token)).await;
        assert_eq!(
            decision,
            UsageDecision::Allowed {
                remaining: 0,
                is_subscriber: true
            }
        );

        // Counter still increments past the quota for observability
        assert_eq!(store.get("a@x.com").await.unwrap().products_count, 11);
    }

    #[tokio::test]
    async fn test_guest_quota_is_shared() {
        let store = Arc::new(AccountStore::new());
        let access = controller(store.clone());

        // Three anonymous calls from "different callers" share one bucket
        assert!(access.request_usage(None).await.is_allowed());
        assert!(access.request_usage(Some("garbage-token")).await.is_allowed());
        assert!(access.request_usage(None).await.is_allowed());

        let decision = access.request_usage(None).await;
        assert_eq!(
            decision,
            UsageDecision::Denied {
                reason: DenyReason::QuotaExhausted
            }
        );
        assert_eq!(store.get(GUEST_EMAIL).await.unwrap().products_count, 3);
    }

    #[tokio::test]
    async fn test_token_for_unknown_account_degrades_to_guest() {
        let store = Arc::new(AccountStore::new());
        let access = controller(store.clone());

        // Validly signed token whose subject was never registered
        let token = access.tokens.issue("ghost@x.com").unwrap();
        assert_eq!(access.resolve_identity(Some(&token)).await, GUEST_EMAIL);

        assert!(access.request_usage(Some(&token)).await.is_allowed());
        assert_eq!(store.get(GUEST_EMAIL).await.unwrap().products_count, 1);
    }

    #[tokio::test]
    async fn test_resolve_identity_live_account() {
        let store = Arc::new(AccountStore::new());
        store.register("A", "a@x.com", "pw").await.unwrap();

        let access = controller(store);
        let token = access.tokens.issue("a@x.com").unwrap();

        assert_eq!(access.resolve_identity(Some(&token)).await, "a@x.com");
        assert_eq!(access.resolve_identity(Some("malformed")).await, GUEST_EMAIL);
        assert_eq!(access.resolve_identity(None).await, GUEST_EMAIL);
    }

    #[tokio::test]
    async fn test_concurrent_requests_do_not_oversell() {
        let store = Arc::new(AccountStore::new());
        store.register("A", "a@x.com", "pw").await.unwrap();

        let access = Arc::new(controller(store.clone()));
        let token = access.tokens.issue("a@x.com").unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let access = Arc::clone(&access);
            let token = token.clone();
            handles.push(tokio::spawn(async move {
                access.request_usage(Some(&token)).await
            }));
        }

        let mut allowed = 0;
        for handle in handles {
            if handle.await.unwrap().is_allowed() {
                allowed += 1;
            }
        }

        assert_eq!(allowed, 3);
        assert_eq!(store.get("a@x.com").await.unwrap().products_count, 3);
    }
}
