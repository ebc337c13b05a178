//! Auth Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use greengrocer_app::{auth::AuthSession, domain::users::records::UserRecord};

pub(crate) mod login;
pub(crate) mod register;
pub(crate) mod verify;

/// Public user profile
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// User UUID
    pub uuid: Uuid,

    /// Email address
    pub email: String,

    /// Whether the user can manage the catalog and orders
    pub is_admin: bool,

    /// When the account was created
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Credentials
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Issued token with the signed-in user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token
    pub token: String,

    /// Token expiry
    pub expires_at: String,

    /// Signed-in user
    pub user: UserResponse,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        SessionResponse {
            token: session.token,
            expires_at: session.expires_at.to_string(),
            user: session.user.into(),
        }
    }
}
