//! Resolution of the authenticated session into a full identity projection.
//!
//! The session stores only a reference to the staff member; this service
//! re-reads the staff row, its role, and the role's grants on every call so
//! the projection always reflects the current role assignment.

use std::sync::Arc;

use clinova_core::{AppError, AppResult, SessionPrincipal};
use clinova_domain::{Permission, StaffId};

use crate::authorization_service::{RolePermissionRepository, RoleRecord};
use crate::staff_service::StaffRepository;

/// Read-only projection of the authenticated staff member.
///
/// Assembled fresh per request. Carries no credential material: the
/// password hash stays behind in the repository record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentIdentity {
    /// Staff identifier.
    pub staff_id: StaffId,
    /// Canonical email address.
    pub email: String,
    /// Given name, if recorded.
    pub first_name: Option<String>,
    /// Family name, if recorded.
    pub last_name: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// The staff member's role.
    pub role: RoleRecord,
    /// Effective permissions granted by the role.
    pub permissions: Vec<Permission>,
}

/// Outcome of resolving the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityResolution {
    /// A live session backed by an active staff record.
    Authenticated(CurrentIdentity),
    /// No session, or a session whose staff record is gone or deactivated.
    Unauthenticated,
}

/// Application service assembling the identity response.
#[derive(Clone)]
pub struct IdentityService {
    staff_repository: Arc<dyn StaffRepository>,
    role_repository: Arc<dyn RolePermissionRepository>,
}

impl IdentityService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        staff_repository: Arc<dyn StaffRepository>,
        role_repository: Arc<dyn RolePermissionRepository>,
    ) -> Self {
        Self {
            staff_repository,
            role_repository,
        }
    }

    /// Resolves the session into an identity projection.
    ///
    /// Absent sessions short-circuit to `Unauthenticated` without touching
    /// the role repository. A session referencing a deleted or deactivated
    /// staff record is treated the same way: the caller holds a cookie but
    /// no longer an account.
    pub async fn resolve_current_identity(
        &self,
        session: Option<&SessionPrincipal>,
    ) -> AppResult<IdentityResolution> {
        let Some(principal) = session else {
            return Ok(IdentityResolution::Unauthenticated);
        };

        let staff = self
            .staff_repository
            .find_by_id(StaffId::from_uuid(principal.staff_id()))
            .await?;

        let Some(staff) = staff else {
            return Ok(IdentityResolution::Unauthenticated);
        };

        if !staff.is_active {
            return Ok(IdentityResolution::Unauthenticated);
        }

        let role = self
            .role_repository
            .find_role(staff.role_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "role '{}' referenced by staff '{}' does not exist",
                    staff.role_id, staff.id
                ))
            })?;

        let permissions = self
            .role_repository
            .list_permissions_for_role(role.id)
            .await?;

        Ok(IdentityResolution::Authenticated(CurrentIdentity {
            staff_id: staff.id,
            email: staff.email,
            first_name: staff.first_name,
            last_name: staff.last_name,
            is_active: staff.is_active,
            role,
            permissions,
        }))
    }
}
