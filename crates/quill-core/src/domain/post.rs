use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a persisted blog post.
///
/// Plain data record; all persistence behavior lives behind the
/// `PostRepository` port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the caller when creating a post.
///
/// `id` and both timestamps are assigned by the store at insert time.
/// The owning user is an explicit field, never ambient request state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub body: String,
}
