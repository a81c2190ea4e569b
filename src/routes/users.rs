/// User Routes
///
/// Registration and profile update.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::{hash_password, AuthenticatedUser};
use crate::db;
use crate::db::users::User;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub email: String,
    pub is_chirpy_red: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
            email: user.email.clone(),
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

/// POST /api/users
///
/// Register a new user. The password is hashed before anything touches the
/// database; the plaintext never leaves this handler.
///
/// # Errors
/// - 400: invalid JSON or duplicate email
/// - 500: hashing or database failure
pub async fn create_user(
    form: web::Json<CreateUserRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let hashed_password = hash_password(&form.password)?;

    let user = db::users::create_user(pool.get_ref(), &form.email, &hashed_password).await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// PUT /api/users
///
/// Replace the authenticated user's email and password.
///
/// # Errors
/// - 400: invalid JSON
/// - 401: missing or invalid access token
/// - 404: token subject no longer exists
/// - 500: hashing or database failure
pub async fn update_user(
    user: AuthenticatedUser,
    form: web::Json<CreateUserRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let hashed_password = hash_password(&form.password)?;

    let updated =
        db::users::update_user(pool.get_ref(), user.0, &form.email, &hashed_password).await?;

    tracing::info!(user_id = %updated.id, "user updated");

    Ok(HttpResponse::Ok().json(UserResponse::from(&updated)))
}
