//! User Storage
//! Mission: Keep registered accounts in memory with bcrypt-hashed passwords

use crate::auth::models::User;
use crate::store::StoreError;
use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::info;

/// In-memory user storage keyed by username
pub struct UserStore {
    users: RwLock<HashMap<String, User>>,
    cost: u32,
}

impl UserStore {
    /// Create an empty user store hashing with bcrypt's default cost
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_COST)
    }

    /// Create an empty user store with an explicit bcrypt cost
    pub fn with_cost(cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            cost,
        }
    }

    /// Register a new user, failing with `Conflict` if the username is taken
    pub fn register(&self, username: &str, password: &str) -> Result<(), StoreError> {
        // Hash outside the lock; the existence check and insert below are one critical section.
        let password_hash =
            hash(password, self.cost).map_err(|e| StoreError::Credential(e.to_string()))?;

        let mut users = self.users.write();
        if users.contains_key(username) {
            return Err(StoreError::Conflict);
        }

        users.insert(
            username.to_string(),
            User {
                username: username.to_string(),
                password_hash,
                created_at: Utc::now().to_rfc3339(),
            },
        );

        info!("✅ Registered user: {} ({} total)", username, users.len());
        Ok(())
    }

    /// Get user by username
    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users.read().get(username).cloned()
    }

    /// Verify username and password
    pub fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
        match self.get_user_by_username(username) {
            Some(user) => {
                let valid =
                    verify(password, &user.password_hash).context("Failed to verify password")?;
                Ok(valid)
            }
            None => Ok(false),
        }
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn create_test_store() -> UserStore {
        UserStore::with_cost(4)
    }

    #[test]
    fn test_register_and_retrieve_user() {
        let store = create_test_store();

        store.register("alice", "pw1").unwrap();

        let user = store.get_user_by_username("alice").unwrap();
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "pw1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let store = create_test_store();

        store.register("alice", "pw1").unwrap();
        assert_eq!(store.register("alice", "other"), Err(StoreError::Conflict));

        // First password still applies
        assert!(store.verify_password("alice", "pw1").unwrap());
        assert!(!store.verify_password("alice", "other").unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_password_verification() {
        let store = create_test_store();
        store.register("bob", "hunter2").unwrap();

        assert!(store.verify_password("bob", "hunter2").unwrap());
        assert!(!store.verify_password("bob", "wrongpassword").unwrap());
        assert!(!store.verify_password("nonexistent", "hunter2").unwrap());
    }

    #[test]
    fn test_concurrent_registration_admits_one() {
        let store = Arc::new(create_test_store());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.register("racer", &format!("pw{i}")).is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }
}
