// src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Form, Json,
};
use serde_json::json;

use crate::auth::{create_jwt, hash_password, verify_password, AuthUser};
use crate::error::on_unique_violation;
use crate::models::{
    CreateTodoSchema, ListQuery, LoginSchema, RegisterSchema, Todo, TokenResponse,
    UpdateTodoSchema, User,
};
use crate::todo;
use crate::validation::ValidatedJson;
use crate::AppError;
use crate::AppState;

const DEFAULT_LIST_LIMIT: i64 = 100;

// --- 1. Root ---

pub async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the API" }))
}

// --- 2. Registration (POST /api/v1/auth/register) ---

pub async fn register_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterSchema>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let password_hash = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, username, password_hash)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(&payload.email)
    .bind(&payload.username)
    .bind(password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(|e| on_unique_violation(e, "Email or username already registered"))?;

    tracing::info!("registered user {}", user.username);

    Ok((StatusCode::CREATED, Json(user)))
}

// --- 3. Login (POST /api/v1/auth/token, form-encoded) ---

pub async fn login_handler(
    State(state): State<AppState>,
    Form(payload): Form<LoginSchema>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(&payload.username)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::Auth("Invalid username or password".into()))?;

    // Unknown user and wrong password answer identically.
    if !verify_password(&payload.password, &user.password_hash) {
        tracing::warn!("failed login attempt for {}", payload.username);
        return Err(AppError::Auth("Invalid username or password".into()));
    }

    let access_token = create_jwt(
        &user.username,
        &state.config.jwt_secret,
        state.config.token_expiry_minutes,
    )?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

// --- 4. Todos (all bearer-protected, owner-scoped) ---

pub async fn create_todo_handler(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateTodoSchema>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let todo = todo::create_todo(&state.db, user.id, body).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn list_todos_handler(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Todo>>, AppError> {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let todos = todo::list_todos(&state.db, user.id, skip, limit).await?;
    Ok(Json(todos))
}

pub async fn get_todo_handler(
    Path(id): Path<i32>,
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Todo>, AppError> {
    let todo = todo::get_todo(&state.db, user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))?;

    Ok(Json(todo))
}

pub async fn update_todo_handler(
    Path(id): Path<i32>,
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(patch): ValidatedJson<UpdateTodoSchema>,
) -> Result<Json<Todo>, AppError> {
    let todo = todo::update_todo(&state.db, user.id, id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))?;

    Ok(Json(todo))
}

pub async fn delete_todo_handler(
    Path(id): Path<i32>,
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let deleted = todo::delete_todo(&state.db, user.id, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Todo not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
