//! Auth service errors.

use argon2::password_hash;
use thiserror::Error;

use crate::{
    auth::{MIN_PASSWORD_LENGTH, TokenError},
    domain::users::UsersServiceError,
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    PasswordTooShort,

    #[error("email address is invalid")]
    InvalidEmail,

    #[error("a user with this email already exists")]
    EmailTaken,

    #[error("user not found")]
    UserNotFound,

    #[error("token is invalid")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("password hashing failed")]
    PasswordHash(#[source] password_hash::Error),

    #[error("token processing error")]
    Token(#[source] TokenError),

    #[error("user storage error")]
    Users(#[source] UsersServiceError),
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::AlreadyExists => Self::EmailTaken,
            UsersServiceError::InvalidEmail => Self::InvalidEmail,
            UsersServiceError::NotFound => Self::UserNotFound,
            other => Self::Users(other),
        }
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Expired => Self::ExpiredToken,
            TokenError::Invalid => Self::InvalidToken,
            other => Self::Token(other),
        }
    }
}

impl From<password_hash::Error> for AuthServiceError {
    fn from(error: password_hash::Error) -> Self {
        Self::PasswordHash(error)
    }
}
