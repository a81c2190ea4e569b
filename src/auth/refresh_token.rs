/// Refresh Token Store
///
/// Long-lived opaque credentials exchanged for new access tokens. A token is
/// 32 cryptographically random bytes, hex-encoded, stored as the primary key
/// of its own row together with expiry and revocation state. Each login adds
/// a fresh token; a user may hold several concurrently valid ones.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, AuthError};

const TOKEN_BYTES: usize = 32;

#[derive(Debug, sqlx::FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Generate a new opaque refresh token (64 hex characters).
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Persist a freshly issued refresh token for a user.
pub async fn save_refresh_token(
    pool: &PgPool,
    user_id: Uuid,
    token: &str,
    expires_in_hours: i64,
) -> Result<RefreshToken, AppError> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(expires_in_hours);

    db::with_timeout(
        sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (token, created_at, updated_at, user_id, expires_at)
            VALUES ($1, $2, $2, $3, $4)
            RETURNING token, created_at, updated_at, user_id, expires_at, revoked_at
            "#,
        )
        .bind(token)
        .bind(now)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(pool),
    )
    .await
}

/// Validate a refresh token and return the owning user id.
///
/// # Errors
/// `RefreshTokenNotFound` when no record matches, `RefreshTokenExpired` once
/// `now >= expires_at`, `RefreshTokenRevoked` when it was revoked.
pub async fn validate_refresh_token(pool: &PgPool, token: &str) -> Result<Uuid, AppError> {
    let record = db::with_timeout(
        sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT token, created_at, updated_at, user_id, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool),
    )
    .await?;

    let record = match record {
        None => {
            tracing::warn!("refresh token not found");
            return Err(AppError::Auth(AuthError::RefreshTokenNotFound));
        }
        Some(record) => record,
    };

    if record.expires_at <= Utc::now() {
        tracing::info!(user_id = %record.user_id, "refresh token expired");
        return Err(AppError::Auth(AuthError::RefreshTokenExpired));
    }

    if record.revoked_at.is_some() {
        tracing::warn!(user_id = %record.user_id, "attempt to use revoked refresh token");
        return Err(AppError::Auth(AuthError::RefreshTokenRevoked));
    }

    Ok(record.user_id)
}

/// Revoke a refresh token. Idempotent: revoking an already-revoked token
/// succeeds again; only an unknown token is an error.
pub async fn revoke_refresh_token(pool: &PgPool, token: &str) -> Result<(), AppError> {
    let result = db::with_timeout(
        sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $1, updated_at = $1
            WHERE token = $2
            "#,
        )
        .bind(Utc::now())
        .bind(token)
        .execute(pool),
    )
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::Auth(AuthError::RefreshTokenNotFound));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_64_hex_characters() {
        let token = generate_refresh_token();

        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        let first = generate_refresh_token();
        let second = generate_refresh_token();

        assert_ne!(first, second);
    }
}
