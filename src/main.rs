use std::net::TcpListener;

use chirpy::configuration::get_configuration;
use chirpy::startup::run;
use chirpy::telemetry::init_telemetry;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    tracing::info!("starting chirpy");

    let configuration = match get_configuration() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "configuration error",
            ));
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&configuration.db_url)
        .await
        .map_err(|e| {
            tracing::error!("failed to create connection pool: {}", e);
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "database error")
        })?;

    let address = format!("127.0.0.1:{}", configuration.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("listening on {}", address);

    let server = run(listener, pool, configuration)?;
    server.await
}
