//! Staff directory ports and application service.
//!
//! Owns the staff lifecycle visible to the dashboard: listing, profile
//! updates, role reassignment, and soft deactivation. Accounts are never
//! deleted; `is_active = false` removes access while keeping history.

use std::sync::Arc;

use async_trait::async_trait;

use clinova_core::{AppError, AppResult, SessionPrincipal};
use clinova_domain::{EmailAddress, Permission, RoleId, StaffId};

use crate::auth_service::PasswordHasher;
use crate::authorization_service::{AuthorizationService, RolePermissionRepository};

/// Minimum length accepted for an initial staff password.
pub const PASSWORD_MIN_LENGTH: usize = 10;

/// Staff record returned by repository queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffRecord {
    /// Unique staff identifier.
    pub id: StaffId,
    /// Canonical email address.
    pub email: String,
    /// Given name, if recorded.
    pub first_name: Option<String>,
    /// Family name, if recorded.
    pub last_name: Option<String>,
    /// Whether the account may log in.
    pub is_active: bool,
    /// The single role assigned to this staff member.
    pub role_id: RoleId,
    /// Argon2id password hash. Never leaves the application layer.
    pub password_hash: Option<String>,
}

/// Insert payload for a new staff row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStaffRecord {
    /// Canonical email address.
    pub email: String,
    /// Argon2id hash of the initial password.
    pub password_hash: String,
    /// Given name, if provided.
    pub first_name: Option<String>,
    /// Family name, if provided.
    pub last_name: Option<String>,
    /// Role assigned at creation.
    pub role_id: RoleId,
}

/// Mutable profile fields of a staff row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffProfileUpdate {
    /// New given name, cleared when `None`.
    pub first_name: Option<String>,
    /// New family name, cleared when `None`.
    pub last_name: Option<String>,
    /// New role assignment.
    pub role_id: RoleId,
}

/// Repository port for staff persistence.
#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Finds a staff member by their unique identifier.
    async fn find_by_id(&self, staff_id: StaffId) -> AppResult<Option<StaffRecord>>;

    /// Finds a staff member by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<StaffRecord>>;

    /// Lists all staff members, active and deactivated.
    async fn list(&self) -> AppResult<Vec<StaffRecord>>;

    /// Creates a new staff row. Returns the assigned identifier.
    async fn create(&self, record: NewStaffRecord) -> AppResult<StaffId>;

    /// Replaces the mutable profile fields of a staff row.
    async fn update_profile(
        &self,
        staff_id: StaffId,
        update: StaffProfileUpdate,
    ) -> AppResult<()>;

    /// Sets the active flag of a staff row.
    async fn set_active(&self, staff_id: StaffId, is_active: bool) -> AppResult<()>;
}

/// Input payload for creating a staff account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStaffInput {
    /// Email address for the new account.
    pub email: String,
    /// Initial plaintext password, hashed before storage.
    pub password: String,
    /// Given name, if provided.
    pub first_name: Option<String>,
    /// Family name, if provided.
    pub last_name: Option<String>,
    /// Role assigned at creation.
    pub role_id: RoleId,
}

/// Application service for staff administration.
#[derive(Clone)]
pub struct StaffService {
    staff_repository: Arc<dyn StaffRepository>,
    role_repository: Arc<dyn RolePermissionRepository>,
    authorization_service: AuthorizationService,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl StaffService {
    /// Creates a new staff service.
    #[must_use]
    pub fn new(
        staff_repository: Arc<dyn StaffRepository>,
        role_repository: Arc<dyn RolePermissionRepository>,
        authorization_service: AuthorizationService,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            staff_repository,
            role_repository,
            authorization_service,
            password_hasher,
        }
    }

    /// Lists the staff directory.
    pub async fn list_staff(&self, actor: &SessionPrincipal) -> AppResult<Vec<StaffRecord>> {
        self.authorization_service
            .require_permission(StaffId::from_uuid(actor.staff_id()), Permission::ReadUser)
            .await?;

        self.staff_repository.list().await
    }

    /// Returns one staff member.
    pub async fn get_staff(
        &self,
        actor: &SessionPrincipal,
        staff_id: StaffId,
    ) -> AppResult<StaffRecord> {
        self.authorization_service
            .require_permission(StaffId::from_uuid(actor.staff_id()), Permission::ReadUser)
            .await?;

        self.staff_repository
            .find_by_id(staff_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("staff member '{staff_id}' not found")))
    }

    /// Creates a staff account with an initial password.
    pub async fn create_staff(
        &self,
        actor: &SessionPrincipal,
        input: CreateStaffInput,
    ) -> AppResult<StaffRecord> {
        self.authorization_service
            .require_permission(StaffId::from_uuid(actor.staff_id()), Permission::CreateUser)
            .await?;

        let email = EmailAddress::new(&input.email)?;

        if input.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "password must be at least {PASSWORD_MIN_LENGTH} characters"
            )));
        }

        self.ensure_role_exists(input.role_id).await?;

        if self
            .staff_repository
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "a staff account with this email already exists".to_owned(),
            ));
        }

        let password_hash = self.password_hasher.hash_password(&input.password)?;
        let staff_id = self
            .staff_repository
            .create(NewStaffRecord {
                email: email.as_str().to_owned(),
                password_hash,
                first_name: input.first_name,
                last_name: input.last_name,
                role_id: input.role_id,
            })
            .await?;

        self.staff_repository
            .find_by_id(staff_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "created staff member '{staff_id}' could not be read back"
                ))
            })
    }

    /// Updates a staff member's profile and role assignment.
    pub async fn update_staff(
        &self,
        actor: &SessionPrincipal,
        staff_id: StaffId,
        update: StaffProfileUpdate,
    ) -> AppResult<StaffRecord> {
        self.authorization_service
            .require_permission(StaffId::from_uuid(actor.staff_id()), Permission::UpdateUser)
            .await?;

        if self.staff_repository.find_by_id(staff_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "staff member '{staff_id}' not found"
            )));
        }

        self.ensure_role_exists(update.role_id).await?;

        self.staff_repository
            .update_profile(staff_id, update)
            .await?;

        self.staff_repository
            .find_by_id(staff_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "updated staff member '{staff_id}' could not be read back"
                ))
            })
    }

    /// Deactivates a staff account (soft delete).
    pub async fn deactivate_staff(
        &self,
        actor: &SessionPrincipal,
        staff_id: StaffId,
    ) -> AppResult<()> {
        self.authorization_service
            .require_permission(StaffId::from_uuid(actor.staff_id()), Permission::DeleteUser)
            .await?;

        if staff_id.as_uuid() == actor.staff_id() {
            return Err(AppError::Validation(
                "cannot deactivate your own account".to_owned(),
            ));
        }

        if self.staff_repository.find_by_id(staff_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "staff member '{staff_id}' not found"
            )));
        }

        self.staff_repository.set_active(staff_id, false).await
    }

    async fn ensure_role_exists(&self, role_id: RoleId) -> AppResult<()> {
        if self.role_repository.find_role(role_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "role '{role_id}' does not exist"
            )));
        }

        Ok(())
    }
}
