//! Password hashing and account registration.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::WebError;

/// Hash a password with Argon2id under its default (memory-hard)
/// parameters. Returns a PHC-format string that embeds the salt.
pub fn hash_password(password: &str) -> Result<String, WebError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC-format hash. `Ok(false)` means
/// the password does not match; `Err` means the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, WebError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("parse password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub struct RegisterUserInput {
    pub email: String,
    pub password: String,
}

/// Create an account with a freshly hashed password.
pub struct RegisterUserUseCase<U> {
    pub users: U,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, WebError> {
        // 1. validate the credentials
        let email = input.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(WebError::Validation("Enter a valid email address."));
        }
        if input.password.is_empty() {
            return Err(WebError::Validation("Password must not be empty."));
        }

        // 2. hash up front; the plaintext goes no further than this module
        let password_hash = hash_password(&input.password)?;

        // 3. store, surfacing a duplicate email as EmailTaken
        self.users.create(email, &password_hash).await
    }
}
