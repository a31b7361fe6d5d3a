//! Post service - the seam between the HTTP layer and the post store.

use std::sync::Arc;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;
use crate::ports::PostRepository;

/// Pass-through facade over the post repository.
///
/// Carries no state and applies no rules of its own; future business
/// logic lands here without touching the handlers or the store.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Persist a new post and return it with its generated fields.
    pub async fn add_new_post(&self, new_post: NewPost) -> Result<Post, RepoError> {
        self.posts.create(new_post).await
    }

    /// Delete an already-resolved post. Returns whether a row was
    /// actually removed.
    pub async fn delete_post(&self, post: &Post) -> Result<bool, RepoError> {
        self.posts.delete(post.id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;

    use super::*;
    use crate::domain::{NewPost, Post};
    use crate::ports::BaseRepository;

    /// Minimal vec-backed repository standing in for the real store.
    struct StubPostRepository {
        rows: Mutex<Vec<Post>>,
        next_id: AtomicI64,
    }

    impl StubPostRepository {
        fn new() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                next_id: AtomicI64::new(1),
            }
        }
    }

    #[async_trait]
    impl BaseRepository<Post, i64> for StubPostRepository {
        async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
            Ok(self.rows.lock().await.iter().find(|p| p.id == id).cloned())
        }

        async fn delete(&self, id: i64) -> Result<bool, RepoError> {
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|p| p.id != id);
            Ok(rows.len() < before)
        }
    }

    #[async_trait]
    impl PostRepository for StubPostRepository {
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
            self.rows.lock().await.push(post.clone());
            Ok(post)
        }

        async fn count(&self) -> Result<u64, RepoError> {
            Ok(self.rows.lock().await.len() as u64)
        }
    }

    #[tokio::test]
    async fn add_new_post_returns_stored_record_unchanged() {
        let repo = Arc::new(StubPostRepository::new());
        let service = PostService::new(repo.clone());

        let post = service
            .add_new_post(NewPost {
                user_id: 7,
                title: "First".to_string(),
                body: "Hello".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(post.user_id, 7);
        assert_eq!(post.title, "First");
        assert_eq!(post.body, "Hello");
        assert_eq!(repo.find_by_id(post.id).await.unwrap(), Some(post));
    }

    #[tokio::test]
    async fn delete_post_reports_whether_a_row_was_removed() {
        let repo = Arc::new(StubPostRepository::new());
        let service = PostService::new(repo.clone());

        let post = service
            .add_new_post(NewPost {
                user_id: 1,
                title: "t".to_string(),
                body: "b".to_string(),
            })
            .await
            .unwrap();

        assert!(service.delete_post(&post).await.unwrap());
        // Second delete of the same record is a no-op, not an error.
        assert!(!service.delete_post(&post).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
