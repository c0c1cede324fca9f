//! Login credential verification.
//!
//! Follows the OWASP guidance the rest of the stack assumes: generic
//! failure outcomes (no account enumeration) and a hash computation on
//! every path so response timing does not reveal whether the email exists.

use std::sync::Arc;

use clinova_core::AppResult;

use crate::staff_service::{StaffRecord, StaffRepository};

/// Port for password hashing operations. Keeps the application layer free
/// of direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Result of a login attempt.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials matched an active account. Session can be established.
    Authenticated(StaffRecord),
    /// Login failed. The reason is deliberately not surfaced.
    Failed,
}

/// Application service for session establishment.
#[derive(Clone)]
pub struct AuthService {
    staff_repository: Arc<dyn StaffRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    /// Creates a new auth service.
    #[must_use]
    pub fn new(
        staff_repository: Arc<dyn StaffRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            staff_repository,
            password_hasher,
        }
    }

    /// Verifies email/password credentials.
    ///
    /// Returns [`LoginOutcome::Failed`] for unknown emails, deactivated
    /// accounts, and wrong passwords alike.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let staff = self.staff_repository.find_by_email(email).await?;

        let Some(staff) = staff else {
            // Hash anyway so unknown emails cost the same as known ones.
            let _ = self.password_hasher.hash_password(password);
            return Ok(LoginOutcome::Failed);
        };

        if !staff.is_active {
            let _ = self.password_hasher.hash_password(password);
            return Ok(LoginOutcome::Failed);
        }

        let Some(ref stored_hash) = staff.password_hash else {
            let _ = self.password_hasher.hash_password(password);
            return Ok(LoginOutcome::Failed);
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, stored_hash)?;

        if !password_valid {
            return Ok(LoginOutcome::Failed);
        }

        Ok(LoginOutcome::Authenticated(staff))
    }
}
