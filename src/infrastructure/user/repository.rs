//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::StoreError;

#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<UserId, User>,
    /// Index for email -> user ID lookup
    email_index: HashMap<String, UserId>,
    last_id: i64,
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl InMemoryUserRepository {
    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.table.read().await.users.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<UserId, StoreError> {
        let mut table = self.table.write().await;

        if table.email_index.contains_key(&user.email) {
            return Err(StoreError::conflict(format!(
                "Email '{}' already registered",
                user.email
            )));
        }

        table.last_id += 1;
        let id = UserId::new(table.last_id);

        table.email_index.insert(user.email.clone(), id);
        table.users.insert(id, User::from_new(id, user));

        Ok(id)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let table = self.table.read().await;

        table
            .email_index
            .get(email)
            .and_then(|id| table.users.get(id))
            .filter(|user| user.password_hash() == password_hash)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();

        let id = repo
            .create(NewUser::new("Ann", "ann@x.com", "hash"))
            .await
            .unwrap();

        let user = repo.find_by_credentials("ann@x.com", "hash").await.unwrap();
        assert_eq!(user.id(), id);
        assert_eq!(user.name(), "Ann");
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = InMemoryUserRepository::new();

        let a = repo.create(NewUser::new("A", "a@x.com", "h")).await.unwrap();
        let b = repo.create(NewUser::new("B", "b@x.com", "h")).await.unwrap();

        assert_eq!(a, UserId::new(1));
        assert_eq!(b, UserId::new(2));
        assert_eq!(repo.count().await, 2);
    }

    #[tokio::test]
    async fn test_email_uniqueness() {
        let repo = InMemoryUserRepository::new();
        repo.create(NewUser::new("Ann", "ann@x.com", "h1")).await.unwrap();

        let result = repo.create(NewUser::new("Other Ann", "ann@x.com", "h2")).await;

        assert!(matches!(result, Err(StoreError::Conflict { .. })));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_wrong_hash_is_not_found() {
        let repo = InMemoryUserRepository::new();
        repo.create(NewUser::new("Ann", "ann@x.com", "hash")).await.unwrap();

        assert_eq!(
            repo.find_by_credentials("ann@x.com", "other").await.unwrap_err(),
            StoreError::NotFound
        );
        assert_eq!(
            repo.find_by_credentials("bob@x.com", "hash").await.unwrap_err(),
            StoreError::NotFound
        );
    }
}
