#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use levelup_core::question_bank::QuestionSeed;
use levelup_core::types::DbId;
use levelup_db::DbPool;
use tower::ServiceExt;

use levelup_api::auth::jwt::{generate_access_token, JwtConfig};
use levelup_api::config::ServerConfig;
use levelup_api::router::build_app_router;
use levelup_api::state::AppState;
use levelup_events::EventBus;

const TEST_JWT_SECRET: &str = "integration-test-secret-of-reasonable-length";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        seed_questions_on_start: false,
        question_bank_path: None,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Fresh in-memory database with migrations applied.
pub async fn test_pool() -> DbPool {
    levelup_db::create_memory_pool()
        .await
        .expect("in-memory database should open")
}

/// A three-question system-design bank.
pub fn small_bank() -> Vec<QuestionSeed> {
    ["alpha", "bravo", "charlie"]
        .iter()
        .map(|key| QuestionSeed {
            question_key: key.to_string(),
            title: format!("Design {key}"),
            prompt: format!("Walk through the design of {key}."),
            guided_answer: format!("Reference design for {key}."),
            category: "system-design".to_string(),
            difficulty: "medium".to_string(),
        })
        .collect()
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: DbPool) -> Router {
    build_app_from_state(AppState::new(pool, test_config(), Arc::new(EventBus::default())))
}

/// Build the router over a seeded bank.
pub async fn build_seeded_app(pool: DbPool, seeds: &[QuestionSeed]) -> Router {
    let state = AppState::new(pool, test_config(), Arc::new(EventBus::default()));
    state
        .flashcards
        .seed_questions(seeds)
        .await
        .expect("seeding should succeed");
    build_app_from_state(state)
}

fn build_app_from_state(state: AppState) -> Router {
    build_app_router(state)
}

/// Bearer token for `user_id` signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_empty_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
