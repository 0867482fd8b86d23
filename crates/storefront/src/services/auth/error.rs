use thiserror::Error;

use crate::store::StoreError;

/// Errors from signup, login, and session lookups.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password verification failed for an existing account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account exists for the given email.
    #[error("no account for that email")]
    UserNotFound,

    /// Signup attempted with an email that already has an account.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// Password rejected at signup. Carries the user-facing reason.
    #[error("{0}")]
    WeakPassword(String),

    /// Email rejected at signup.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// Password hashing or hash parsing failed.
    #[error("password hash error: {0}")]
    Hash(argon2::password_hash::Error),

    /// Account or session persistence failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
