/// Session Routes
///
/// Login issues an access token plus a fresh refresh token; refresh exchanges
/// a live refresh token for a new access token (the refresh token itself is
/// not rotated); revoke ends a refresh token's life early.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{
    generate_access_token, generate_refresh_token, get_bearer_token, revoke_refresh_token,
    save_refresh_token, validate_refresh_token, verify_password,
};
use crate::configuration::Settings;
use crate::db;
use crate::error::{AppError, AuthError};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub email: String,
    pub is_chirpy_red: bool,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// POST /api/login
///
/// Authenticate with email and password. A successful login always stores
/// one new refresh token; earlier tokens from other logins stay valid.
///
/// # Errors
/// - 400: invalid JSON
/// - 401: unknown email or wrong password (same message for both)
/// - 500: hashing or database failure
pub async fn login(
    form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let user = db::users::get_user_by_email(pool.get_ref(), &form.email)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

    let password_matches = verify_password(&form.password, &user.hashed_password)?;
    if !password_matches {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    }

    let token = generate_access_token(user.id, &settings.token_secret, settings.expires_in_seconds)?;

    let refresh_token = generate_refresh_token();
    let stored = save_refresh_token(
        pool.get_ref(),
        user.id,
        &refresh_token,
        settings.refresh_expires_in_hours,
    )
    .await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(HttpResponse::Ok().json(LoginResponse {
        id: user.id.to_string(),
        created_at: user.created_at.to_rfc3339(),
        updated_at: user.updated_at.to_rfc3339(),
        email: user.email,
        is_chirpy_red: user.is_chirpy_red,
        token,
        refresh_token: stored.token,
    }))
}

/// POST /api/refresh
///
/// Exchange a refresh token (sent as the bearer credential) for a new access
/// token. The refresh token stays valid until it expires or is revoked.
///
/// # Errors
/// - 401: missing header, or token unknown/expired/revoked
/// - 500: database failure
pub async fn refresh(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = get_bearer_token(req.headers())?;

    let user_id = validate_refresh_token(pool.get_ref(), &refresh_token).await?;

    let user = db::users::get_user_by_id(pool.get_ref(), user_id)
        .await?
        .ok_or(AppError::Auth(AuthError::RefreshTokenNotFound))?;

    let token = generate_access_token(user.id, &settings.token_secret, settings.expires_in_seconds)?;

    Ok(HttpResponse::Ok().json(RefreshResponse { token }))
}

/// POST /api/revoke
///
/// Revoke the refresh token sent as the bearer credential. Revoking a token
/// that is already revoked succeeds again.
///
/// # Errors
/// - 401: missing header or unknown token
/// - 500: database failure
pub async fn revoke(req: HttpRequest, pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let refresh_token = get_bearer_token(req.headers())?;

    revoke_refresh_token(pool.get_ref(), &refresh_token).await?;

    Ok(HttpResponse::NoContent().finish())
}
