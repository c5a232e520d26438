use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::LoginResponse,
};
use tracing::{info, warn};

use crate::ApiContext;

pub const TOKEN_TYPE: &str = "bearer";

/// Decides whether a username/password pair may open an admin session.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify_credentials(&self, username: &str, password: &str) -> bool;
}

/// Accepts exactly one configured pair. Plain string comparison, no hashing.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new("admin", "admin123")
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify_credentials(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Proof that the caller holds a live admin session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    username: String,
}

impl AdminSession {
    pub fn username(&self) -> &str {
        &self.username
    }
}

pub fn mint_session_token(cfg: &TokenConfig, username: &str) -> Result<String, ApiError> {
    let now = Utc::now();
    let exp = Duration::try_seconds(cfg.ttl_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            ApiError::new(
                ErrorCode::Internal,
                format!("token ttl of {}s is out of range", cfg.ttl_seconds),
            )
        })?;
    let claims = SessionClaims {
        sub: username.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|e| ApiError::new(ErrorCode::Internal, format!("token mint failed: {e}")))
}

fn decode_session_token(cfg: &TokenConfig, token: &str) -> Option<SessionClaims> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

pub async fn login(
    ctx: &ApiContext,
    username: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    if !ctx.verifier.verify_credentials(username, password).await {
        warn!(%username, "admin login rejected");
        return Err(ApiError::new(
            ErrorCode::InvalidCredentials,
            "invalid username or password",
        ));
    }

    let token = mint_session_token(&ctx.tokens, username)?;
    ctx.session.set();
    info!(%username, "admin logged in");

    Ok(LoginResponse {
        token,
        token_type: TOKEN_TYPE.to_string(),
    })
}

pub fn logout(ctx: &ApiContext) {
    if ctx.session.is_set() {
        info!("admin logged out");
    }
    ctx.session.clear();
}

pub fn is_authenticated(ctx: &ApiContext) -> bool {
    ctx.session.is_set()
}

/// Admits a request when the session flag is set and `token` is a valid,
/// unexpired session token.
pub fn authorize_admin(ctx: &ApiContext, token: Option<&str>) -> Result<AdminSession, ApiError> {
    if !ctx.session.is_set() {
        return Err(ApiError::unauthorized());
    }
    let claims = token
        .and_then(|token| decode_session_token(&ctx.tokens, token))
        .ok_or_else(ApiError::unauthorized)?;
    Ok(AdminSession {
        username: claims.sub,
    })
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
