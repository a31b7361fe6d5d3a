//! End-to-end tests for the post CRUD surface, run against an
//! in-process app wired to in-memory stores.

mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};

use api_server::handlers;
use api_server::state::AppState;
use quill_core::domain::NewPost;
use quill_core::ports::{BaseRepository, PostRepository};

use common::{authenticated_user, password_service, token_service};

fn seed_post(user_id: i64, n: usize) -> NewPost {
    NewPost {
        user_id,
        title: format!("Post {}", n),
        body: format!("Body {}", n),
    }
}

#[actix_rt::test]
async fn create_form_is_served_to_everyone() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(password_service()))
            .configure(handlers::configure_routes),
    )
    .await;

    // Unauthenticated
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/post/create").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Authenticated
    let (_, token) = authenticated_user(&state, &tokens, "reader@example.com").await;
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/post/create")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("<form"));
}

#[actix_rt::test]
async fn unauthenticated_create_is_rejected_and_stores_nothing() {
    let state = AppState::in_memory();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service()))
            .app_data(web::Data::new(password_service()))
            .configure(handlers::configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/post/create")
            .set_json(serde_json::json!({
                "user_id": 1, "title": "t", "body": "b"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(state.posts.count().await.unwrap(), 0);
}

#[actix_rt::test]
async fn unauthenticated_delete_leaves_the_row() {
    let state = AppState::in_memory();
    let post = state.posts.create(seed_post(1, 1)).await.unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service()))
            .app_data(web::Data::new(password_service()))
            .configure(handlers::configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/post/delete/{}", post.id))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(state.posts.count().await.unwrap(), 1);
    assert!(state.posts.find_by_id(post.id).await.unwrap().is_some());
}

#[actix_rt::test]
async fn authenticated_user_creates_post_with_supplied_fields() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let (user, token) = authenticated_user(&state, &tokens, "author@example.com").await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(password_service()))
            .configure(handlers::configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/post/create")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(serde_json::json!({
                "user_id": user.id, "title": "t", "body": "b"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());

    // The row carries exactly the supplied fields plus generated ones.
    let stored = state.posts.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.user_id, user.id);
    assert_eq!(stored.title, "t");
    assert_eq!(stored.body, "b");
    assert_eq!(state.posts.count().await.unwrap(), 1);
}

#[actix_rt::test]
async fn deleting_one_of_five_posts_removes_only_that_id() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let (user, token) = authenticated_user(&state, &tokens, "author@example.com").await;
    for n in 1..=5 {
        state.posts.create(seed_post(user.id, n)).await.unwrap();
    }
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(password_service()))
            .configure(handlers::configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/post/delete/3")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(test::read_body(resp).await.is_empty());

    assert_eq!(state.posts.count().await.unwrap(), 4);
    assert!(state.posts.find_by_id(3).await.unwrap().is_none());
    for id in [1, 2, 4, 5] {
        assert!(state.posts.find_by_id(id).await.unwrap().is_some());
    }
}

#[actix_rt::test]
async fn deleting_unknown_id_is_not_found() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let (user, token) = authenticated_user(&state, &tokens, "author@example.com").await;
    state.posts.create(seed_post(user.id, 1)).await.unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(password_service()))
            .configure(handlers::configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/post/delete/99")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(state.posts.count().await.unwrap(), 1);
}
