//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::{PostRepository, UserRepository};
use quill_infra::database::{
    DatabaseConfig, DatabaseConnections, InMemoryPostRepository, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use quill_infra::database::{PostgresPostRepository, PostgresUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub post_service: PostService,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let (db, posts, users): (
            Option<Arc<DatabaseConnections>>,
            Arc<dyn PostRepository>,
            Arc<dyn UserRepository>,
        ) = {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let posts = Arc::new(PostgresPostRepository::new(conn.main.clone()));
                        let users = Arc::new(PostgresUserRepository::new(conn.main.clone()));
                        (Some(conn), posts, users)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Self::memory_repos()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::memory_repos()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (db, posts, users) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::memory_repos()
        };

        let post_service = PostService::new(posts.clone());
        tracing::info!("Application state initialized");

        Self {
            posts,
            users,
            post_service,
            db,
        }
    }

    /// State wired to fresh in-memory repositories. Used as the
    /// no-database fallback and by the integration tests.
    pub fn in_memory() -> Self {
        let (db, posts, users) = Self::memory_repos();
        let post_service = PostService::new(posts.clone());

        Self {
            posts,
            users,
            post_service,
            db,
        }
    }

    fn memory_repos() -> (
        Option<Arc<DatabaseConnections>>,
        Arc<dyn PostRepository>,
        Arc<dyn UserRepository>,
    ) {
        (
            None,
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )
    }
}
