/// Application Error Handling
///
/// Central error type for the whole service. Domain-specific enums feed a
/// unified `AppError` that maps onto the HTTP taxonomy:
/// validation -> 400, auth -> 401, forbidden -> 403, not found -> 404,
/// hashing/database/internal -> 500.
///
/// Every error is serialized as `{"error": "<message>"}`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// Authentication and authorization failures. All map to 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing or malformed Authorization header.
    MissingAuthorization,
    /// Wrong email/password pair. One message for both cases so callers
    /// cannot probe which emails are registered.
    InvalidCredentials,
    /// Access token past its expiry.
    TokenExpired,
    /// Access token could not be parsed as a JWT.
    TokenMalformed,
    /// Access token signature does not verify under the server secret.
    BadSignature,
    /// Refresh token has no matching record.
    RefreshTokenNotFound,
    /// Refresh token past its expiry.
    RefreshTokenExpired,
    /// Refresh token was explicitly revoked.
    RefreshTokenRevoked,
    /// Webhook ApiKey does not match the configured key.
    BadApiKey,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingAuthorization => write!(f, "no authorization in header"),
            AuthError::InvalidCredentials => write!(f, "incorrect email or password"),
            AuthError::TokenExpired => write!(f, "token has expired"),
            AuthError::TokenMalformed => write!(f, "malformed token"),
            AuthError::BadSignature => write!(f, "invalid token signature"),
            AuthError::RefreshTokenNotFound => write!(f, "unknown refresh token"),
            AuthError::RefreshTokenExpired => write!(f, "refresh token has expired"),
            AuthError::RefreshTokenRevoked => write!(f, "refresh token has been revoked"),
            AuthError::BadApiKey => write!(f, "invalid api key"),
        }
    }
}

impl StdError for AuthError {}

/// Password hashing failures. All map to 500: a hash we cannot parse is
/// corrupt server-side data, never a client problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// Stored hash is not a recognized PHC-encoded hash.
    MalformedHash,
    /// The hashing primitive itself failed.
    HashingFailed(String),
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordError::MalformedHash => write!(f, "stored password hash is malformed"),
            PasswordError::HashingFailed(msg) => write!(f, "password hashing failed: {}", msg),
        }
    }
}

impl StdError for PasswordError {}

/// Unified application error.
#[derive(Debug)]
pub enum AppError {
    /// Malformed JSON, missing or oversized fields.
    Validation(String),
    Auth(AuthError),
    /// Acting on another user's resource.
    Forbidden(String),
    NotFound(String),
    Password(PasswordError),
    /// Database failures, timeouts, and everything else terminal.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::Auth(e) => write!(f, "{}", e),
            AppError::Forbidden(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::Password(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl StdError for AppError {}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::Password(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                // The only unique column in the schema is users.email.
                AppError::Validation("email is already registered".to_string())
            }
            _ => AppError::Internal(format!("database error: {}", err)),
        }
    }
}

/// Error body shared by every endpoint.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Password(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(_) | AppError::NotFound(_) => {
                tracing::debug!(error = %self, "request rejected");
            }
            AppError::Auth(_) | AppError::Forbidden(_) => {
                tracing::warn!(error = %self, "authorization failure");
            }
            AppError::Password(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "internal error");
            }
        }

        let message = match self {
            // Never leak internal detail to the client.
            AppError::Password(_) | AppError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse { error: message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::Validation("body is missing".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_errors_map_to_401() {
        for e in [
            AuthError::MissingAuthorization,
            AuthError::InvalidCredentials,
            AuthError::TokenExpired,
            AuthError::TokenMalformed,
            AuthError::BadSignature,
            AuthError::RefreshTokenNotFound,
            AuthError::RefreshTokenExpired,
            AuthError::RefreshTokenRevoked,
            AuthError::BadApiKey,
        ] {
            assert_eq!(AppError::Auth(e).status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn forbidden_maps_to_403() {
        let err = AppError::Forbidden("not your chirp".to_string());
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::NotFound("chirp not found".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn hashing_failures_map_to_500() {
        let err = AppError::Password(PasswordError::MalformedHash);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn row_not_found_converts_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        match err {
            AppError::NotFound(_) => (),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn credential_error_does_not_reveal_which_field_was_wrong() {
        let msg = AuthError::InvalidCredentials.to_string();
        assert_eq!(msg, "incorrect email or password");
    }
}
