/// Chirp Routes
///
/// Creation runs the length check before the content filter, so a body that
/// only fits after masking is still rejected. Reads are public; deletion is
/// owner-only.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::db;
use crate::db::chirps::{Chirp, SortOrder};
use crate::error::AppError;
use crate::profanity::clean_body;

const MAX_CHIRP_LENGTH: usize = 140;

#[derive(Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
}

#[derive(Deserialize)]
pub struct ListChirpsQuery {
    pub author_id: Option<Uuid>,
    pub sort: Option<String>,
}

#[derive(Serialize)]
pub struct ChirpResponse {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub body: String,
    pub user_id: String,
}

impl From<&Chirp> for ChirpResponse {
    fn from(chirp: &Chirp) -> Self {
        Self {
            id: chirp.id.to_string(),
            created_at: chirp.created_at.to_rfc3339(),
            updated_at: chirp.updated_at.to_rfc3339(),
            body: chirp.body.clone(),
            user_id: chirp.user_id.to_string(),
        }
    }
}

/// POST /api/chirps
///
/// # Errors
/// - 400: invalid JSON, empty body, or body over 140 characters
/// - 401: missing or invalid access token
/// - 500: database failure
pub async fn create_chirp(
    user: AuthenticatedUser,
    form: web::Json<CreateChirpRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if form.body.is_empty() {
        return Err(AppError::Validation("body is missing".to_string()));
    }

    // Length is checked before filtering.
    if form.body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(AppError::Validation("ERR_CHIRP_TOO_LONG".to_string()));
    }

    let cleaned_body = clean_body(&form.body);

    let chirp = db::chirps::create_chirp(pool.get_ref(), &cleaned_body, user.0).await?;

    tracing::info!(chirp_id = %chirp.id, user_id = %chirp.user_id, "chirp created");

    Ok(HttpResponse::Created().json(ChirpResponse::from(&chirp)))
}

/// GET /api/chirps
///
/// Public listing, oldest first by default. `author_id` restricts to one
/// author; `sort=desc` reverses the order.
///
/// # Errors
/// - 400: malformed query parameters
/// - 500: database failure
pub async fn list_chirps(
    query: web::Query<ListChirpsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let order = match query.sort.as_deref() {
        None | Some("asc") => SortOrder::Ascending,
        Some("desc") => SortOrder::Descending,
        Some(other) => {
            return Err(AppError::Validation(format!(
                "unknown sort order: {}",
                other
            )))
        }
    };

    let chirps = db::chirps::list_chirps(pool.get_ref(), query.author_id, order).await?;

    let response: Vec<ChirpResponse> = chirps.iter().map(ChirpResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/chirps/{chirpID}
///
/// # Errors
/// - 400: chirp id is not a UUID
/// - 404: no such chirp
/// - 500: database failure
pub async fn get_chirp(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let chirp_id = Uuid::parse_str(&path)
        .map_err(|_| AppError::Validation("invalid chirp ID".to_string()))?;

    let chirp = db::chirps::get_chirp(pool.get_ref(), chirp_id)
        .await?
        .ok_or_else(|| AppError::NotFound("chirp not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ChirpResponse::from(&chirp)))
}

/// DELETE /api/chirps/{chirpID}
///
/// Owner-only.
///
/// # Errors
/// - 400: chirp id is not a UUID
/// - 401: missing or invalid access token
/// - 403: chirp belongs to somebody else
/// - 404: no such chirp
/// - 500: database failure
pub async fn delete_chirp(
    user: AuthenticatedUser,
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let chirp_id = Uuid::parse_str(&path)
        .map_err(|_| AppError::Validation("invalid chirp ID".to_string()))?;

    let chirp = db::chirps::get_chirp(pool.get_ref(), chirp_id)
        .await?
        .ok_or_else(|| AppError::NotFound("chirp not found".to_string()))?;

    if chirp.user_id != user.0 {
        return Err(AppError::Forbidden(
            "chirp belongs to another user".to_string(),
        ));
    }

    db::chirps::delete_chirp(pool.get_ref(), chirp.id).await?;

    tracing::info!(chirp_id = %chirp.id, user_id = %user.0, "chirp deleted");

    Ok(HttpResponse::NoContent().finish())
}
