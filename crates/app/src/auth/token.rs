//! Bearer token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the user's UUID and admin flag.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserUuid;

/// Shortest signing secret accepted, in bytes.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Default token lifetime (24 hours).
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 1440;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret must be at least {MIN_JWT_SECRET_BYTES} bytes")]
    SecretTooShort,

    #[error("token lifetime must be positive")]
    InvalidLifetime,

    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,

    #[error("token could not be encoded")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User UUID
    pub sub: Uuid,

    /// Admin flag at the time the token was issued
    pub admin: bool,

    /// Issued at, seconds since the epoch
    pub iat: i64,

    /// Expires at, seconds since the epoch
    pub exp: i64,
}

/// A signed token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Signing configuration.
#[derive(Clone)]
pub struct JwtConfig {
    secret: Vec<u8>,
    lifetime: SignedDuration,
}

impl JwtConfig {
    /// Build a configuration from a secret and a lifetime in minutes.
    ///
    /// # Errors
    ///
    /// - [`TokenError::SecretTooShort`]: the secret is under 32 bytes.
    /// - [`TokenError::InvalidLifetime`]: the lifetime is not positive.
    pub fn new(secret: &str, lifetime_minutes: i64) -> Result<Self, TokenError> {
        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(TokenError::SecretTooShort);
        }

        if lifetime_minutes <= 0 {
            return Err(TokenError::InvalidLifetime);
        }

        Ok(Self {
            secret: secret.as_bytes().to_vec(),
            lifetime: SignedDuration::from_mins(lifetime_minutes),
        })
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"**redacted**")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

impl Drop for JwtConfig {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

/// Issues and verifies bearer tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: SignedDuration,
}

impl JwtService {
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            validation,
            lifetime: config.lifetime,
        }
    }

    /// Issue a token for a user, valid from now.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] if the token cannot be encoded.
    pub fn issue(&self, user: UserUuid, is_admin: bool) -> Result<IssuedToken, TokenError> {
        self.issue_at(user, is_admin, Timestamp::now())
    }

    pub(crate) fn issue_at(
        &self,
        user: UserUuid,
        is_admin: bool,
        issued_at: Timestamp,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = issued_at
            .checked_add(self.lifetime)
            .map_err(|_err| TokenError::InvalidLifetime)?;

        let claims = Claims {
            sub: user.into_uuid(),
            admin: is_admin,
            iat: issued_at.as_second(),
            exp: expires_at.as_second(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encoding)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Expired`]: the token is past its expiry.
    /// - [`TokenError::Invalid`]: the token is malformed or badly signed.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|error| match error.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for JwtService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
