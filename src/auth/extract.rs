/// Credential extraction from request headers.
///
/// Two schemes share the Authorization header: `Bearer <token>` for user
/// credentials (access or refresh tokens) and `ApiKey <key>` for the Polka
/// webhook. `AuthenticatedUser` is the extractor JWT-protected handlers take
/// as an argument; it validates the bearer access token and yields the
/// caller's user id.

use actix_web::{dev::Payload, http::header::HeaderMap, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::jwt::validate_access_token;
use crate::configuration::Settings;
use crate::error::{AppError, AuthError};

/// Extract the token from a `Bearer <token>` Authorization header.
pub fn get_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    strip_authorization_scheme(headers, "Bearer ")
}

/// Extract the key from an `ApiKey <key>` Authorization header.
pub fn get_api_key(headers: &HeaderMap) -> Result<String, AppError> {
    strip_authorization_scheme(headers, "ApiKey ")
}

fn strip_authorization_scheme(headers: &HeaderMap, scheme: &str) -> Result<String, AppError> {
    let value = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Auth(AuthError::MissingAuthorization))?;

    value
        .strip_prefix(scheme)
        .map(|credential| credential.to_string())
        .ok_or(AppError::Auth(AuthError::MissingAuthorization))
}

/// The authenticated caller, derived from a valid bearer access token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let token = get_bearer_token(req.headers())?;
    let settings = req
        .app_data::<web::Data<Settings>>()
        .ok_or_else(|| AppError::Internal("application settings missing".to_string()))?;
    let user_id = validate_access_token(&token, &settings.token_secret)?;

    Ok(AuthenticatedUser(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderValue, AUTHORIZATION};

    fn headers_with_authorization(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let headers = headers_with_authorization("Bearer some-token");

        assert_eq!(get_bearer_token(&headers).unwrap(), "some-token");
    }

    #[test]
    fn bearer_token_may_contain_spaces() {
        let headers = headers_with_authorization("Bearer token with spaces");

        assert_eq!(get_bearer_token(&headers).unwrap(), "token with spaces");
    }

    #[test]
    fn missing_header_is_rejected() {
        let headers = HeaderMap::new();

        match get_bearer_token(&headers) {
            Err(AppError::Auth(AuthError::MissingAuthorization)) => (),
            other => panic!("expected MissingAuthorization, got {:?}", other),
        }
    }

    #[test]
    fn bearer_without_space_is_rejected() {
        let headers = headers_with_authorization("BearerTokenWithoutSpace");

        assert!(get_bearer_token(&headers).is_err());
    }

    #[test]
    fn api_key_is_extracted() {
        let headers = headers_with_authorization("ApiKey f271c81ff7084ee5b99a5091b42d486e");

        assert_eq!(
            get_api_key(&headers).unwrap(),
            "f271c81ff7084ee5b99a5091b42d486e"
        );
    }

    #[test]
    fn bearer_header_is_not_an_api_key() {
        let headers = headers_with_authorization("Bearer some-token");

        assert!(get_api_key(&headers).is_err());
    }
}
