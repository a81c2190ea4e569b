/// Access Token Generation and Validation
///
/// Short-lived HS256 tokens signed with the server-wide secret. There is no
/// revocation path for access tokens; the short TTL is the only mitigation.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::claims::Claims;
use crate::error::{AppError, AuthError};

/// Generate a signed access token for a user.
///
/// # Errors
/// Fails only if token encoding itself fails.
pub fn generate_access_token(
    user_id: Uuid,
    secret: &str,
    expires_in_seconds: i64,
) -> Result<String, AppError> {
    let claims = Claims::new(user_id, expires_in_seconds);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token generation failed: {}", e)))
}

/// Validate an access token and return the embedded user id.
///
/// # Errors
/// `TokenExpired` once `now >= exp`, `BadSignature` under the wrong secret,
/// `TokenMalformed` for anything that does not parse as a JWT.
pub fn validate_access_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Zero leeway: a token issued with a zero or negative TTL must already
    // count as expired.
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Auth(AuthError::TokenExpired)
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::Auth(AuthError::BadSignature)
        }
        _ => AppError::Auth(AuthError::TokenMalformed),
    })?;

    data.claims.user_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-characters-long";

    #[test]
    fn issue_then_validate_returns_the_user() {
        let user_id = Uuid::new_v4();

        let token = generate_access_token(user_id, SECRET, 3600).expect("failed to issue token");
        let parsed = validate_access_token(&token, SECRET).expect("failed to validate token");

        assert_eq!(parsed, user_id);
    }

    #[test]
    fn zero_ttl_token_is_expired() {
        let token =
            generate_access_token(Uuid::new_v4(), SECRET, 0).expect("failed to issue token");

        match validate_access_token(&token, SECRET) {
            Err(AppError::Auth(AuthError::TokenExpired)) => (),
            other => panic!("expected TokenExpired, got {:?}", other),
        }
    }

    #[test]
    fn negative_ttl_token_is_expired() {
        let token =
            generate_access_token(Uuid::new_v4(), SECRET, -3600).expect("failed to issue token");

        match validate_access_token(&token, SECRET) {
            Err(AppError::Auth(AuthError::TokenExpired)) => (),
            other => panic!("expected TokenExpired, got {:?}", other),
        }
    }

    #[test]
    fn wrong_secret_is_a_bad_signature() {
        let token =
            generate_access_token(Uuid::new_v4(), SECRET, 3600).expect("failed to issue token");

        match validate_access_token(&token, "a-completely-different-secret") {
            Err(AppError::Auth(AuthError::BadSignature)) => (),
            other => panic!("expected BadSignature, got {:?}", other),
        }
    }

    #[test]
    fn garbage_token_is_malformed() {
        match validate_access_token("definitely.not.a-jwt", SECRET) {
            Err(AppError::Auth(AuthError::TokenMalformed)) => (),
            other => panic!("expected TokenMalformed, got {:?}", other),
        }
    }
}
