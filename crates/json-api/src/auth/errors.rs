//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use greengrocer_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::InvalidToken => StatusError::unauthorized().brief("Invalid token"),
        AuthServiceError::ExpiredToken => StatusError::unauthorized().brief("Token has expired"),
        AuthServiceError::PasswordTooShort | AuthServiceError::InvalidEmail => {
            StatusError::bad_request().brief(error.to_string())
        }
        AuthServiceError::EmailTaken => StatusError::conflict().brief(error.to_string()),
        AuthServiceError::UserNotFound => StatusError::not_found().brief("User not found"),
        AuthServiceError::PasswordHash(_)
        | AuthServiceError::Token(_)
        | AuthServiceError::Users(_) => {
            error!("authentication failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use greengrocer_app::auth::TokenError;

    use super::*;

    #[test]
    fn token_problems_are_unauthorized() {
        for error in [AuthServiceError::InvalidToken, AuthServiceError::ExpiredToken] {
            assert_eq!(into_status_error(error).code.as_u16(), 401);
        }
    }

    #[test]
    fn validation_failures_keep_their_message() {
        let status = into_status_error(AuthServiceError::PasswordTooShort);

        assert_eq!(status.code.as_u16(), 400);
        assert_eq!(status.brief, "password must be at least 6 characters long");
    }

    #[test]
    fn token_processing_errors_are_hidden() {
        let status = into_status_error(AuthServiceError::Token(TokenError::SecretTooShort));

        assert_eq!(status.code.as_u16(), 500);
    }
}
