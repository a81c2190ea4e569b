/// JWT claims for access tokens.
///
/// Access tokens are self-contained: subject, issued-at, and expiry are all
/// the server ever needs to validate one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AuthError};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string).
    pub sub: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user, expiring `expires_in_seconds` from now.
    pub fn new(user_id: Uuid, expires_in_seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            iat: now,
            exp: now + expires_in_seconds,
        }
    }

    /// Extract the user id from the subject claim.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::Auth(AuthError::TokenMalformed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_carry_subject_and_window() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, 3600);

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn user_id_round_trips() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, 3600);

        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn non_uuid_subject_is_malformed() {
        let mut claims = Claims::new(Uuid::new_v4(), 3600);
        claims.sub = "not-a-uuid".to_string();

        match claims.user_id() {
            Err(AppError::Auth(AuthError::TokenMalformed)) => (),
            other => panic!("expected TokenMalformed, got {:?}", other),
        }
    }
}
