//! HTTP handlers and route configuration.

mod auth;
mod health;
mod post;

use actix_web::web;

/// Configure all application routes.
///
/// Handlers are registered as direct function references, so a typo in
/// a route target fails to compile instead of failing at dispatch.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/post")
            .route("/create", web::get().to(post::create_form))
            .route("/create", web::post().to(post::store))
            .route("/delete/{id}", web::delete().to(post::destroy)),
    );

    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            ),
    );
}
