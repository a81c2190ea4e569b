/// Password Hashing and Verification
///
/// Argon2id with a per-hash random salt; algorithm parameters travel inside
/// the PHC string, so verification needs no external state. Any password is
/// hashable, including the empty string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordVerifier, SaltString},
    Argon2, PasswordHasher,
};

use crate::error::{AppError, PasswordError};

/// Hash a plaintext password.
///
/// # Errors
/// Fails only if the hashing primitive itself fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Password(PasswordError::HashingFailed(e.to_string())))
}

/// Verify a plaintext password against a stored hash.
///
/// Returns `Ok(true)` on a match, `Ok(false)` on a mismatch.
///
/// # Errors
/// `MalformedHash` if the stored value is not a recognized hash encoding.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Password(PasswordError::MalformedHash))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Password(PasswordError::HashingFailed(
            e.to_string(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let password = "correct horse battery staple";
        let hash = hash_password(password).expect("failed to hash password");

        assert_ne!(password, hash);
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(password, &hash).expect("failed to verify password"));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("secret123").expect("failed to hash password");

        let matches = verify_password("not the password", &hash).expect("failed to verify");
        assert!(!matches);
    }

    #[test]
    fn empty_password_is_hashed_and_compared_normally() {
        let hash = hash_password("").expect("failed to hash empty password");

        assert!(verify_password("", &hash).expect("failed to verify"));
        assert!(!verify_password("nonempty", &hash).expect("failed to verify"));
    }

    #[test]
    fn malformed_hash_is_a_distinct_error() {
        let result = verify_password("secret123", "not_a_real_hash");

        match result {
            Err(AppError::Password(PasswordError::MalformedHash)) => (),
            other => panic!("expected MalformedHash, got {:?}", other),
        }
    }

    #[test]
    fn same_password_hashes_differently_each_time() {
        let first = hash_password("secret123").expect("failed to hash");
        let second = hash_password("secret123").expect("failed to hash");

        // Fresh random salt per hash.
        assert_ne!(first, second);
    }
}
