// src/config.rs
use std::net::SocketAddr;

/// Process configuration, built once at startup from environment variables
/// and passed around inside `AppState` rather than read ambiently.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub token_expiry_minutes: i64,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        let database_max_connections = env_or("DATABASE_MAX_CONNECTIONS", 5)?;
        let token_expiry_minutes = env_or("TOKEN_EXPIRY_MINUTES", 30)?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()
            .map_err(|e| format!("invalid BIND_ADDR: {e}"))?;

        let cors_origin = std::env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Config {
            database_url,
            database_max_connections,
            jwt_secret,
            token_expiry_minutes,
            bind_addr,
            cors_origin,
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e| format!("invalid {key}: {e}")),
        Err(_) => Ok(default),
    }
}
