//! Accounts and sessions.
//!
//! Accounts live in the `users` snapshot as a list of records carrying an
//! argon2 password hash; the signed-in user lives under the `user` key
//! and is what "the session" means here. Verification goes through the
//! [`CredentialVerifier`] seam so tests can swap the hasher; login always
//! checks the stored hash, there is no accept-anything mode.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use lumina_core::{Role, User};

use crate::store::{self, StateStore, keys};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

/// Hashes and verifies passwords.
pub trait CredentialVerifier: Send + Sync {
    /// Hash a password for storage.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Check a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Production verifier backed by argon2id with per-password salts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArgonVerifier;

impl CredentialVerifier for ArgonVerifier {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(AuthError::Hash)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(AuthError::Hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// One stored account: the public user record plus its password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountRecord {
    #[serde(flatten)]
    user: User,
    password_hash: String,
}

/// Signup, login, and session state over the snapshot store.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn StateStore>,
    verifier: Arc<dyn CredentialVerifier>,
    /// Signing up with this email grants the admin role.
    admin_email: Option<String>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        store: Arc<dyn StateStore>,
        verifier: Arc<dyn CredentialVerifier>,
        admin_email: Option<String>,
    ) -> Self {
        Self {
            store,
            verifier,
            admin_email,
        }
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Rejects malformed emails, passwords under six characters, and
    /// emails that already have an account.
    #[instrument(skip(self, password))]
    pub fn signup(&self, email: &str, name: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim().to_lowercase();
        validate_email(&email)?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let mut accounts = self.accounts()?;
        if accounts.iter().any(|account| account.user.email == email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let role = if self
            .admin_email
            .as_deref()
            .is_some_and(|admin| admin.eq_ignore_ascii_case(&email))
        {
            Role::Admin
        } else {
            Role::Customer
        };

        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            name: name.trim().to_string(),
            role,
            created_at: Utc::now(),
        };

        accounts.push(AccountRecord {
            user: user.clone(),
            password_hash: self.verifier.hash(password)?,
        });
        store::persist_as(self.store.as_ref(), keys::USERS, &accounts)?;
        self.set_session(&user)?;
        Ok(user)
    }

    /// Verify credentials and sign the account in.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim().to_lowercase();
        let accounts = self.accounts()?;
        let account = accounts
            .iter()
            .find(|account| account.user.email == email)
            .ok_or(AuthError::UserNotFound)?;

        if !self.verifier.verify(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.set_session(&account.user)?;
        Ok(account.user.clone())
    }

    /// Drop the session. Signing out while signed out is fine.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(keys::USER)?;
        Ok(())
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(store::load_as(self.store.as_ref(), keys::USER)?)
    }

    /// All registered users, without their password hashes.
    pub fn users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self
            .accounts()?
            .into_iter()
            .map(|account| account.user)
            .collect())
    }

    fn accounts(&self) -> Result<Vec<AccountRecord>, AuthError> {
        Ok(store::load_as(self.store.as_ref(), keys::USERS)?.unwrap_or_default())
    }

    fn set_session(&self, user: &User) -> Result<(), AuthError> {
        store::persist_as(self.store.as_ref(), keys::USER, user)?;
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail(email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    /// Plaintext verifier so tests skip the argon2 work function.
    struct PlainVerifier;

    impl CredentialVerifier for PlainVerifier {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            Ok(format!("plain:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            Ok(hash == format!("plain:{password}"))
        }
    }

    fn service(admin_email: Option<&str>) -> AuthService {
        AuthService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(PlainVerifier),
            admin_email.map(str::to_string),
        )
    }

    #[test]
    fn signup_then_login_round_trips() {
        let auth = service(None);
        let created = auth
            .signup("jo@example.com", "Jo", "hunter22")
            .expect("signup");
        assert_eq!(created.role, Role::Customer);
        assert_eq!(
            auth.current_user().expect("session").map(|u| u.id),
            Some(created.id.clone())
        );

        auth.logout().expect("logout");
        assert!(auth.current_user().expect("session").is_none());

        let logged_in = auth.login("jo@example.com", "hunter22").expect("login");
        assert_eq!(logged_in.id, created.id);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let auth = service(None);
        auth.signup("jo@example.com", "Jo", "hunter22").expect("signup");
        assert!(matches!(
            auth.login("jo@example.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn unknown_email_is_rejected() {
        let auth = service(None);
        assert!(matches!(
            auth.login("nobody@example.com", "whatever"),
            Err(AuthError::UserNotFound)
        ));
    }

    #[test]
    fn duplicate_email_is_rejected_case_insensitively() {
        let auth = service(None);
        auth.signup("jo@example.com", "Jo", "hunter22").expect("signup");
        assert!(matches!(
            auth.signup("JO@example.com", "Jo Again", "hunter22"),
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[test]
    fn weak_password_and_bad_email_are_rejected() {
        let auth = service(None);
        assert!(matches!(
            auth.signup("jo@example.com", "Jo", "short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            auth.signup("not-an-email", "Jo", "hunter22"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.signup("jo@nodot", "Jo", "hunter22"),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn configured_admin_email_grants_the_admin_role() {
        let auth = service(Some("admin@lumina.shop"));
        let admin = auth
            .signup("Admin@lumina.shop", "Boss", "hunter22")
            .expect("signup");
        assert_eq!(admin.role, Role::Admin);

        let customer = auth
            .signup("jo@example.com", "Jo", "hunter22")
            .expect("signup");
        assert_eq!(customer.role, Role::Customer);
    }

    #[test]
    fn argon_verifier_round_trips() {
        let verifier = ArgonVerifier;
        let hash = verifier.hash("hunter22").expect("hash");
        assert!(verifier.verify("hunter22", &hash).expect("verify"));
        assert!(!verifier.verify("wrong", &hash).expect("verify"));
    }
}
