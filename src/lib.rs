// src/lib.rs
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod todo;
pub mod validation;

pub use config::Config;
pub use error::AppError;

use handlers::*;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Builds the full router. Panics on an unparseable CORS origin, which is a
/// startup-time configuration mistake.
pub fn app(state: AppState) -> Router {
    let origin = state
        .config
        .cors_origin
        .parse::<HeaderValue>()
        .expect("CORS_ORIGIN is not a valid header value");

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(root_handler))
        // auth
        .route("/api/v1/auth/register", post(register_handler))
        .route("/api/v1/auth/token", post(login_handler))
        // todos
        .route("/api/v1/todos/", post(create_todo_handler))
        .route("/api/v1/todos/", get(list_todos_handler))
        .route("/api/v1/todos/:id", get(get_todo_handler))
        .route("/api/v1/todos/:id", patch(update_todo_handler))
        .route("/api/v1/todos/:id", delete(delete_todo_handler))
        .with_state(state)
        .layer(cors)
}
