use actix_files as fs;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;

use crate::configuration::Settings;
use crate::error::AppError;
use crate::metrics::HitCounter;
use crate::middleware::{MetricsMiddleware, RequestLogger};
use crate::routes::{
    create_chirp, create_user, delete_chirp, get_chirp, health_check, list_chirps, login, metrics,
    polka_webhook, refresh, reset, revoke, update_user,
};

pub fn run(
    listener: TcpListener,
    connection: PgPool,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let connection = web::Data::new(connection);
    let settings = web::Data::new(settings);
    let hit_counter = Arc::new(HitCounter::new());
    let hit_counter_data = web::Data::from(hit_counter.clone());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestLogger)

            // Shared state
            .app_data(connection.clone())
            .app_data(settings.clone())
            .app_data(hit_counter_data.clone())

            // Extractor failures use the same error body as everything else
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::Validation(format!("invalid JSON: {}", err)).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::Validation(format!("invalid query string: {}", err)).into()
            }))

            .service(
                web::scope("/api")
                    .route("/healthz", web::get().to(health_check))
                    .service(
                        web::resource("/users")
                            .route(web::post().to(create_user))
                            .route(web::put().to(update_user)),
                    )
                    .route("/login", web::post().to(login))
                    .route("/refresh", web::post().to(refresh))
                    .route("/revoke", web::post().to(revoke))
                    .service(
                        web::resource("/chirps")
                            .route(web::get().to(list_chirps))
                            .route(web::post().to(create_chirp)),
                    )
                    .service(
                        web::resource("/chirps/{chirpID}")
                            .route(web::get().to(get_chirp))
                            .route(web::delete().to(delete_chirp)),
                    )
                    .route("/polka/webhooks", web::post().to(polka_webhook)),
            )
            .service(
                web::scope("/admin")
                    .route("/metrics", web::get().to(metrics))
                    .route("/reset", web::post().to(reset)),
            )

            // Static file serving; every hit feeds the metrics counter
            .service(
                web::scope("/app")
                    .wrap(MetricsMiddleware::new(hit_counter.clone()))
                    .service(fs::Files::new("/", "./public").index_file("index.html")),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
