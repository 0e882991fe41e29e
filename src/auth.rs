// src/auth.rs
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::User;
use crate::{AppError, AppState};

// --- 1. Password handling (Argon2) ---

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!("password hashing failed: {}", e);
            AppError::Internal
        })?
        .to_string();
    Ok(password_hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(password_hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// --- 2. JWT (access token) handling ---

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub exp: usize,
}

pub fn create_jwt(username: &str, secret: &str, expiry_minutes: i64) -> Result<String, AppError> {
    let expiration = Utc::now() + Duration::minutes(expiry_minutes);

    let claims = Claims {
        sub: username.to_owned(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("token signing failed: {}", e);
        AppError::Internal
    })
}

pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(token_data.claims)
}

// --- 3. Auth extractor ---
// Handlers take `user: AuthUser` to require a valid bearer token; extraction
// runs before any body parsing or store access.

pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Auth("Missing or malformed bearer token".into()))?;

        let claims = decode_jwt(bearer.token(), &state.config.jwt_secret).map_err(|e| {
            tracing::warn!("token rejected: {}", e);
            AppError::Auth("Invalid or expired token".into())
        })?;

        // The token only proves who the caller was at issue time; the account
        // must still resolve to a user row.
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(&claims.sub)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::Auth("Invalid or expired token".into()))?;

        Ok(AuthUser {
            id: user.id,
            username: user.username,
        })
    }
}
