//! In-memory repositories - used as fallback when no database is
//! configured and as substitutable stores in tests.
//! Note: Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, NewUser, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

/// In-memory post store keyed by id, with sequential id assignment
/// mirroring an auto-increment column.
pub struct InMemoryPostRepository {
    rows: RwLock<BTreeMap<i64, Post>>,
    next_id: AtomicI64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now();
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: new_post.user_id,
            title: new_post.title,
            body: new_post.body,
            created_at: now,
            updated_at: now,
        };

        self.rows.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.rows.read().await.len() as u64)
    }
}

/// In-memory user store with the same unique-email rule the `users`
/// table enforces.
pub struct InMemoryUserRepository {
    rows: RwLock<BTreeMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;

        if rows.values().any(|u| u.email == new_user.email) {
            return Err(RepoError::Constraint(format!(
                "duplicate key value violates unique constraint on email: {}",
                new_user.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };

        rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> NewPost {
        NewPost {
            user_id: 1,
            title: "Hello".to_string(),
            body: "World".to_string(),
        }
    }

    #[tokio::test]
    async fn created_post_round_trips_with_generated_fields() {
        let repo = InMemoryPostRepository::new();

        let created = repo.create(sample_post()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.user_id, 1);
        assert_eq!(created.title, "Hello");
        assert_eq!(created.body, "World");

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let repo = InMemoryPostRepository::new();
        for _ in 0..3 {
            repo.create(sample_post()).await.unwrap();
        }

        assert!(repo.delete(2).await.unwrap());

        assert_eq!(repo.count().await.unwrap(), 2);
        assert!(repo.find_by_id(2).await.unwrap().is_none());
        assert!(repo.find_by_id(1).await.unwrap().is_some());
        assert!(repo.find_by_id(3).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_a_noop() {
        let repo = InMemoryPostRepository::new();
        repo.create(sample_post()).await.unwrap();

        assert!(!repo.delete(99).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let new_user = |email: &str| NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
        };

        repo.create(new_user("a@example.com")).await.unwrap();
        let err = repo.create(new_user("a@example.com")).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn find_by_email_matches_exact_address() {
        let repo = InMemoryUserRepository::new();
        repo.create(NewUser {
            email: "a@example.com".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap();

        assert!(
            repo.find_by_email("a@example.com")
                .await
                .unwrap()
                .is_some()
        );
        assert!(repo.find_by_email("b@example.com").await.unwrap().is_none());
    }
}
