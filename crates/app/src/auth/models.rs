//! Auth data models.

use jiff::Timestamp;

use crate::domain::users::records::{UserRecord, UserUuid};

/// Caller identity taken from a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User the token was issued to.
    pub uuid: UserUuid,

    /// Whether the user may manage the catalog and orders.
    pub is_admin: bool,
}

/// A freshly issued token and the user it belongs to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserRecord,
}
