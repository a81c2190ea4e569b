/// Polka Webhook
///
/// The billing provider posts subscription events here, authenticated with a
/// shared ApiKey. Only `user.upgraded` changes anything; every other event is
/// acknowledged and ignored so the provider does not retry.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::get_api_key;
use crate::configuration::Settings;
use crate::db;
use crate::error::{AppError, AuthError};

const EVENT_USER_UPGRADED: &str = "user.upgraded";

#[derive(Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    pub data: WebhookData,
}

#[derive(Deserialize)]
pub struct WebhookData {
    pub user_id: String,
}

/// POST /api/polka/webhooks
///
/// # Errors
/// - 400: invalid JSON or user id
/// - 401: missing or wrong ApiKey
/// - 404: event references an unknown user
/// - 500: database failure
pub async fn polka_webhook(
    req: HttpRequest,
    form: web::Json<WebhookRequest>,
    pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let api_key = get_api_key(req.headers())?;
    if api_key != settings.polka_key {
        return Err(AppError::Auth(AuthError::BadApiKey));
    }

    let user_id = Uuid::parse_str(&form.data.user_id)
        .map_err(|_| AppError::Validation("invalid user ID".to_string()))?;

    let user = db::users::get_user_by_id(pool.get_ref(), user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    if form.event == EVENT_USER_UPGRADED {
        db::users::set_chirpy_red(pool.get_ref(), user.id, true).await?;
        tracing::info!(user_id = %user.id, "user upgraded to chirpy red");
    }

    Ok(HttpResponse::NoContent().finish())
}
