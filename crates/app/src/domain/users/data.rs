//! Users Data

use crate::domain::users::{errors::UsersServiceError, records::UserUuid};

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Trim and lowercase an email address, rejecting obviously malformed ones.
///
/// # Errors
///
/// Returns [`UsersServiceError::InvalidEmail`] when the address is blank, has
/// whitespace, or lacks a local part or domain.
pub fn normalize_email(email: &str) -> Result<String, UsersServiceError> {
    let email = email.trim().to_lowercase();

    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        })
        && !email.chars().any(char::is_whitespace);

    if !valid {
        return Err(UsersServiceError::InvalidEmail);
    }

    Ok(email)
}
