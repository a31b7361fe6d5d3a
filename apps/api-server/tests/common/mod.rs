//! Shared fixtures for the HTTP integration tests.

use std::sync::Arc;

use quill_core::domain::{NewUser, User};
use quill_core::ports::{PasswordService, TokenService, UserRepository};
use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

use api_server::state::AppState;

pub fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "integration-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "quill-test".to_string(),
    }))
}

pub fn password_service() -> Arc<dyn PasswordService> {
    Arc::new(Argon2PasswordService::new())
}

/// Insert a user directly into the state's store and mint a token for
/// them.
#[allow(dead_code)]
pub async fn authenticated_user(
    state: &AppState,
    tokens: &Arc<dyn TokenService>,
    email: &str,
) -> (User, String) {
    let user = state
        .users
        .create(NewUser {
            email: email.to_string(),
            password_hash: "unused-hash".to_string(),
        })
        .await
        .unwrap();

    let token = tokens.generate_token(user.id, &user.email).unwrap();
    (user, token)
}
