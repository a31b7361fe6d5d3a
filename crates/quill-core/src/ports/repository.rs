use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// Generic repository trait covering the operations every entity store
/// shares.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    ///
    /// Returns `Ok(true)` if a row was removed and `Ok(false)` if no row
    /// matched. A missing id is an idempotent no-op, never an error.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Post repository with domain-specific methods.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Insert a new post. The store assigns `id` and timestamps and
    /// returns the persisted record including the generated fields.
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError>;

    /// Total number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Insert a new user. The store assigns `id` and timestamps.
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
