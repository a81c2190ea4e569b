/// Admin Routes
///
/// Metrics reads the file-server hit counter; reset wipes every user (chirps
/// and refresh tokens cascade) and zeroes the counter. Reset is refused
/// outside the dev platform.

use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;

use crate::configuration::Settings;
use crate::db;
use crate::error::AppError;
use crate::metrics::HitCounter;

#[derive(Serialize)]
pub struct MetricsResponse {
    pub hits: u64,
}

/// GET /admin/metrics
pub async fn metrics(counter: web::Data<HitCounter>) -> HttpResponse {
    HttpResponse::Ok().json(MetricsResponse {
        hits: counter.get(),
    })
}

/// POST /admin/reset
///
/// # Errors
/// - 403: platform is not "dev"
/// - 500: database failure
pub async fn reset(
    pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
    counter: web::Data<HitCounter>,
) -> Result<HttpResponse, AppError> {
    if settings.platform != "dev" {
        return Err(AppError::Forbidden(
            "reset is only available on the dev platform".to_string(),
        ));
    }

    db::users::delete_all_users(pool.get_ref()).await?;
    counter.reset();

    tracing::info!("all users deleted and hit counter reset");

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Reset OK"))
}
