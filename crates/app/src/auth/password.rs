//! Password handling.

use std::fmt;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString, rand_core::OsRng},
};
use zeroize::Zeroize;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A plaintext password, wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Hash a password into an argon2 PHC string.
///
/// # Errors
///
/// Returns an error if argon2 rejects the input.
pub fn hash_password(password: &Password) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.expose().as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC string.
///
/// Malformed hashes never verify.
#[must_use]
pub fn verify_password(password: &Password, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.expose().as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hashed_password_verifies() -> TestResult {
        let password = Password::new("correct horse");
        let hash = hash_password(&password)?;

        assert!(hash.starts_with("$argon2"), "expected a PHC string, got {hash}");
        assert!(verify_password(&password, &hash));
        assert!(!verify_password(&Password::new("wrong horse"), &hash));

        Ok(())
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password(&Password::new("anything"), "plaintext"));
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = Password::new("hunter22");

        assert_eq!(format!("{password:?}"), "Password(**redacted**)");
    }

    #[test]
    fn length_counts_characters() {
        assert_eq!(Password::new("pässwö").len(), 6);
    }
}
