/// Database Access Layer
///
/// Typed query functions over the connection pool, one module per table.
/// Every query runs under a fixed deadline so a stuck database fails the
/// request instead of pinning a worker; there are no retries anywhere.

pub mod chirps;
pub mod users;

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a database future under the per-request deadline. A timeout surfaces
/// as an internal error; the caller never retries.
pub(crate) async fn with_timeout<T>(
    query: impl Future<Output = Result<T, sqlx::Error>>,
) -> Result<T, AppError> {
    match tokio::time::timeout(QUERY_TIMEOUT, query).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::Internal("database query timed out".to_string())),
    }
}
