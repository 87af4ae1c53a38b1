//! Login and logout.

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::types::SessionRecord;
use crate::error::WebError;
use crate::session::authenticated_session;
use crate::usecase::credentials::{hash_password, verify_password};

pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// Deployment-wide API key, stashed in the session at login.
    pub api_key: String,
    /// Token from the cookie the login page was served under, if any.
    pub presented_token: Option<String>,
}

/// Verify credentials and issue a fresh authenticated session.
pub struct LoginUseCase<U, S> {
    pub users: U,
    pub sessions: S,
}

impl<U: UserRepository, S: SessionRepository> LoginUseCase<U, S> {
    pub async fn execute(&self, input: LoginInput) -> Result<SessionRecord, WebError> {
        // 1. look up the account
        let user = self.users.find_by_email(input.email.trim()).await?;
        let Some(user) = user else {
            // burn a hash so both failure paths cost one argon2 run
            let _ = hash_password(&input.password);
            return Err(WebError::NoSuchAccount);
        };

        // 2. check the password
        if !verify_password(&input.password, &user.password_hash)? {
            return Err(WebError::WrongPassword);
        }

        // 3. discard whatever session the login page was using; a login
        //    always starts from a fresh token
        if let Some(token) = input.presented_token {
            self.sessions.delete(&token).await?;
        }

        // 4. issue the session bound to the user
        let session = authenticated_session(user.id, input.api_key);
        self.sessions.create(&session).await?;
        Ok(session)
    }
}

pub struct LogoutInput {
    pub token: Option<String>,
}

/// Drop the presented session, if any. Safe to call logged out.
pub struct LogoutUseCase<S> {
    pub sessions: S,
}

impl<S: SessionRepository> LogoutUseCase<S> {
    pub async fn execute(&self, input: LogoutInput) -> Result<(), WebError> {
        if let Some(token) = input.token {
            self.sessions.delete(&token).await?;
        }
        Ok(())
    }
}
