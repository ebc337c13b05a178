//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::{
        AuthServiceError, AuthSession, AuthenticatedUser, JwtService, MIN_PASSWORD_LENGTH,
        Password, hash_password, verify_password,
    },
    database::Db,
    domain::users::{
        PgUsersService, UsersService, UsersServiceError,
        data::NewUser,
        records::{UserRecord, UserUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    users: PgUsersService,
    tokens: JwtService,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, tokens: JwtService) -> Self {
        Self {
            users: PgUsersService::new(db),
            tokens,
        }
    }

    /// Create a user with a hashed password.
    ///
    /// Registration goes through here with `is_admin` false; the CLI uses it to
    /// create administrators.
    ///
    /// # Errors
    ///
    /// Returns an error if the password is too short, the email is invalid or
    /// taken, or storage fails.
    pub async fn create_user(
        &self,
        email: &str,
        password: &Password,
        is_admin: bool,
    ) -> Result<UserRecord, AuthServiceError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthServiceError::PasswordTooShort);
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                email: email.to_string(),
                password_hash,
                is_admin,
            })
            .await?;

        info!(user = %user.uuid, is_admin, "user created");

        Ok(user)
    }

    fn session_for(&self, user: UserRecord) -> Result<AuthSession, AuthServiceError> {
        let issued = self.tokens.issue(user.uuid, user.is_admin)?;

        Ok(AuthSession {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(
        &self,
        email: &str,
        password: Password,
    ) -> Result<AuthSession, AuthServiceError> {
        let user = self.create_user(email, &password, false).await?;

        self.session_for(user)
    }

    async fn login(&self, email: &str, password: Password) -> Result<AuthSession, AuthServiceError> {
        let user = match self.users.find_user_by_email(email).await {
            Ok(user) => user,
            Err(UsersServiceError::NotFound | UsersServiceError::InvalidEmail) => {
                debug!("login attempt for unknown email");
                return Err(AuthServiceError::InvalidCredentials);
            }
            Err(error) => return Err(error.into()),
        };

        if !verify_password(&password, &user.password_hash) {
            debug!(user = %user.uuid, "login attempt with wrong password");
            return Err(AuthServiceError::InvalidCredentials);
        }

        self.session_for(user)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let claims = self.tokens.verify(bearer_token)?;

        Ok(AuthenticatedUser {
            uuid: UserUuid::from_uuid(claims.sub),
            is_admin: claims.admin,
        })
    }

    async fn current_user(&self, user: UserUuid) -> Result<UserRecord, AuthServiceError> {
        Ok(self.users.get_user(user).await?)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a customer account and sign it in.
    async fn register(&self, email: &str, password: Password)
    -> Result<AuthSession, AuthServiceError>;

    /// Exchange credentials for a token.
    async fn login(&self, email: &str, password: Password) -> Result<AuthSession, AuthServiceError>;

    /// Verify a bearer token and return the caller it identifies.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Load the stored profile of an authenticated user.
    async fn current_user(&self, user: UserUuid) -> Result<UserRecord, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn register_creates_customer_and_token() -> TestResult {
        let ctx = TestContext::new().await;

        let session = ctx
            .auth
            .register(" New@Example.com", Password::new("secret1"))
            .await?;

        assert_eq!(session.user.email, "new@example.com");
        assert!(!session.user.is_admin);

        let caller = ctx.auth.authenticate_bearer(&session.token).await?;

        assert_eq!(caller.uuid, session.user.uuid);
        assert!(!caller.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        let ctx = TestContext::new().await;

        let result = ctx
            .auth
            .register("short@example.com", Password::new("12345"))
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::PasswordTooShort)),
            "expected PasswordTooShort, got {result:?}"
        );
    }

    #[tokio::test]
    async fn register_rejects_taken_email() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth
            .register("taken@example.com", Password::new("secret1"))
            .await?;

        let result = ctx
            .auth
            .register("TAKEN@example.com", Password::new("secret2"))
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::EmailTaken)),
            "expected EmailTaken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_returns_admin_flag_in_token() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth
            .create_user("admin@example.com", &Password::new("admin-pass"), true)
            .await?;

        let session = ctx
            .auth
            .login("admin@example.com", Password::new("admin-pass"))
            .await?;

        let caller = ctx.auth.authenticate_bearer(&session.token).await?;

        assert!(caller.is_admin);
        assert_eq!(caller.uuid, session.user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth
            .register("ada@example.com", Password::new("secret1"))
            .await?;

        let result = ctx
            .auth
            .login("ada@example.com", Password::new("secret2"))
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_with_unknown_email_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .auth
            .login("nobody@example.com", Password::new("secret1"))
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[tokio::test]
    async fn authenticate_bearer_rejects_garbage() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("garbage").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidToken)),
            "expected InvalidToken, got {result:?}"
        );
    }

    #[tokio::test]
    async fn current_user_returns_profile() -> TestResult {
        let ctx = TestContext::new().await;

        let session = ctx
            .auth
            .register("profile@example.com", Password::new("secret1"))
            .await?;

        let user = ctx.auth.current_user(session.user.uuid).await?;

        assert_eq!(user.email, "profile@example.com");

        Ok(())
    }
}
