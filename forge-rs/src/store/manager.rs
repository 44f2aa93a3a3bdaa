//! In-memory account store
//!
//! Process-lifetime mapping from email to [`Account`]. Constructed once at
//! startup and passed by handle into the access controller and request
//! handlers; lost on restart.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::types::{Account, GUEST_EMAIL};
use crate::error::{ForgeError, Result};

/// Identity store: email -> account
pub struct AccountStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl AccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        AccountStore {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a new account
    ///
    /// Fails with `InvalidInput` when email or password is empty and with
    /// `AlreadyExists` on a duplicate email. The password is stored as a
    /// salted Argon2 hash.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Account> {
        if email.is_empty() || password.is_empty() {
            return Err(ForgeError::InvalidInput(
                "Email and password required".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(ForgeError::AlreadyExists);
        }

        let account = Account::new(email.to_string(), name.to_string(), password_hash);
        accounts.insert(email.to_string(), account.clone());

        info!("Registered account: {}", email);
        Ok(account)
    }

    /// Authenticate an account by email and password
    ///
    /// Unknown email and wrong password both surface as `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account> {
        debug!("Authentication attempt for {}", email);

        let accounts = self.accounts.read().await;
        let Some(account) = accounts.get(email) else {
            warn!("Authentication failed: unknown email {}", email);
            return Err(ForgeError::InvalidCredentials);
        };

        let parsed_hash =
            PasswordHash::new(&account.password_hash).map_err(|_| ForgeError::InvalidCredentials)?;

        let verified = Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();

        if verified {
            info!("Authentication successful for {}", email);
            Ok(account.clone())
        } else {
            warn!("Authentication failed: invalid password for {}", email);
            Err(ForgeError::InvalidCredentials)
        }
    }

    /// Look up an account without side effects
    pub async fn get(&self, email: &str) -> Option<Account> {
        let accounts = self.accounts.read().await;
        accounts.get(email).cloned()
    }

    /// Whether an account exists for this email
    pub async fn contains(&self, email: &str) -> bool {
        let accounts = self.accounts.read().await;
        accounts.contains_key(email)
    }

    /// Get the shared guest account, creating it on first use
    pub async fn get_or_create_guest(&self) -> Account {
        {
            let accounts = self.accounts.read().await;
            if let Some(guest) = accounts.get(GUEST_EMAIL) {
                return guest.clone();
            }
        }

        let mut accounts = self.accounts.write().await;
        accounts
            .entry(GUEST_EMAIL.to_string())
            .or_insert_with(Account::guest)
            .clone()
    }

    /// Run a mutation against an account under the write lock
    ///
    /// The closure executes atomically with respect to all other store
    /// operations, so a quota check and increment cannot interleave with a
    /// concurrent request for the same account. Returns `None` when the
    /// email is unknown.
    pub async fn update<T>(&self, email: &str, f: impl FnOnce(&mut Account) -> T) -> Option<T> {
        let mut accounts = self.accounts.write().await;
        accounts.get_mut(email).map(f)
    }

    /// Mark an account as subscribed
    ///
    /// Hook for an out-of-scope payment webhook handler; nothing in this
    /// service calls it on its own.
    pub async fn confirm_subscription(&self, email: &str) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(email)
            .ok_or_else(|| ForgeError::NotFound(email.to_string()))?;

        account.is_subscriber = true;
        info!("Subscription confirmed for {}", email);
        Ok(())
    }

    /// Number of known accounts (guest included once created)
    pub async fn count(&self) -> usize {
        let accounts = self.accounts.read().await;
        accounts.len()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a password with Argon2 and a fresh random salt
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ForgeError::PasswordHash(e.to_string()))?;

    Ok(password_hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let store = AccountStore::new();

        let account = store
            .register("Amina", "a@x.com", "pw1")
            .await
            .unwrap();
        assert_eq!(account.email, "a@x.com");
        assert_eq!(account.name, "Amina");
        assert_eq!(account.products_count, 0);
        assert!(!account.is_subscriber);

        let account = store.authenticate("a@x.com", "pw1").await.unwrap();
        assert_eq!(account.email, "a@x.com");

        let result = store.authenticate("a@x.com", "wrong").await;
        assert!(matches!(result, Err(ForgeError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let store = AccountStore::new();

        // Same error as a wrong password, to avoid enumeration
        let result = store.authenticate("nobody@example.com", "pw").await;
        assert!(matches!(result, Err(ForgeError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let store = AccountStore::new();

        store.register("A", "a@x.com", "pw1").await.unwrap();
        let result = store.register("B", "a@x.com", "pw2").await;
        assert!(matches!(result, Err(ForgeError::AlreadyExists)));

        // First registration is untouched
        let account = store.get("a@x.com").await.unwrap();
        assert_eq!(account.name, "A");
        assert_eq!(account.products_count, 0);
        assert!(!account.is_subscriber);
        assert!(store.authenticate("a@x.com", "pw1").await.is_ok());
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let store = AccountStore::new();

        let result = store.register("A", "", "pw").await;
        assert!(matches!(result, Err(ForgeError::InvalidInput(_))));

        let result = store.register("A", "a@x.com", "").await;
        assert!(matches!(result, Err(ForgeError::InvalidInput(_))));

        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_get_or_create_guest_idempotent() {
        let store = AccountStore::new();

        let guest = store.get_or_create_guest().await;
        assert_eq!(guest.email, GUEST_EMAIL);
        assert_eq!(guest.products_count, 0);

        store
            .update(GUEST_EMAIL, |account| account.products_count += 1)
            .await
            .unwrap();

        // Second call returns the same bucket, not a fresh one
        let guest = store.get_or_create_guest().await;
        assert_eq!(guest.products_count, 1);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_update_unknown_email() {
        let store = AccountStore::new();
        let result = store.update("missing@x.com", |_| ()).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_confirm_subscription() {
        let store = AccountStore::new();
        store.register("A", "a@x.com", "pw").await.unwrap();

        store.confirm_subscription("a@x.com").await.unwrap();
        assert!(store.get("a@x.com").await.unwrap().is_subscriber);

        let result = store.confirm_subscription("nobody@x.com").await;
        assert!(matches!(result, Err(ForgeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_password_hashes_are_salted() {
        let store = AccountStore::new();
        store.register("A", "a@x.com", "same-pw").await.unwrap();
        store.register("B", "b@x.com", "same-pw").await.unwrap();

        let a = store.get("a@x.com").await.unwrap();
        let b = store.get("b@x.com").await.unwrap();
        assert_ne!(a.password_hash, b.password_hash);
    }
}
