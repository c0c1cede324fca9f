//! Role and permission resolution.
//!
//! Every protected use-case funnels through [`AuthorizationService`], which
//! resolves a staff member's effective permission set from their role and
//! checks membership. Permissions are never stored per staff member.

use std::sync::Arc;

use async_trait::async_trait;

use clinova_core::{AppError, AppResult};
use clinova_domain::{Permission, RoleId, StaffId};

/// Role definition returned by repository queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    /// Stable role identifier.
    pub id: RoleId,
    /// Unique role name.
    pub name: String,
    /// Human-readable description shown in the dashboard.
    pub description: String,
}

/// Repository port for roles and role-to-permission grants.
#[async_trait]
pub trait RolePermissionRepository: Send + Sync {
    /// Finds a role by its identifier.
    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<RoleRecord>>;

    /// Lists all roles.
    async fn list_roles(&self) -> AppResult<Vec<RoleRecord>>;

    /// Returns the permissions granted by a role.
    async fn list_permissions_for_role(&self, role_id: RoleId) -> AppResult<Vec<Permission>>;

    /// Returns the effective permissions of a staff member via their role.
    async fn list_permissions_for_staff(&self, staff_id: StaffId) -> AppResult<Vec<Permission>>;
}

/// Application service for permission checks.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn RolePermissionRepository>,
}

impl AuthorizationService {
    /// Creates a new service from the role repository.
    #[must_use]
    pub fn new(repository: Arc<dyn RolePermissionRepository>) -> Self {
        Self { repository }
    }

    /// Ensures a staff member holds the required permission.
    pub async fn require_permission(
        &self,
        staff_id: StaffId,
        permission: Permission,
    ) -> AppResult<()> {
        let permissions = self.repository.list_permissions_for_staff(staff_id).await?;

        if permissions.iter().any(|value| value == &permission) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "staff '{staff_id}' is missing permission '{}'",
            permission.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use clinova_core::{AppError, AppResult};
    use clinova_domain::{Permission, RoleId, StaffId};

    use super::{AuthorizationService, RolePermissionRepository, RoleRecord};

    struct FakeRolePermissionRepository {
        grants: HashMap<StaffId, Vec<Permission>>,
    }

    #[async_trait]
    impl RolePermissionRepository for FakeRolePermissionRepository {
        async fn find_role(&self, _role_id: RoleId) -> AppResult<Option<RoleRecord>> {
            Ok(None)
        }

        async fn list_roles(&self) -> AppResult<Vec<RoleRecord>> {
            Ok(Vec::new())
        }

        async fn list_permissions_for_role(
            &self,
            _role_id: RoleId,
        ) -> AppResult<Vec<Permission>> {
            Ok(Vec::new())
        }

        async fn list_permissions_for_staff(
            &self,
            staff_id: StaffId,
        ) -> AppResult<Vec<Permission>> {
            Ok(self.grants.get(&staff_id).cloned().unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn granted_permission_passes() {
        let staff_id = StaffId::new();
        let service = AuthorizationService::new(Arc::new(FakeRolePermissionRepository {
            grants: HashMap::from([(staff_id, vec![Permission::ReadUser])]),
        }));

        let result = service
            .require_permission(staff_id, Permission::ReadUser)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn missing_permission_is_forbidden() {
        let staff_id = StaffId::new();
        let service = AuthorizationService::new(Arc::new(FakeRolePermissionRepository {
            grants: HashMap::from([(staff_id, vec![Permission::ReadUser])]),
        }));

        let result = service
            .require_permission(staff_id, Permission::DeleteUser)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn unknown_staff_has_no_permissions() {
        let service = AuthorizationService::new(Arc::new(FakeRolePermissionRepository {
            grants: HashMap::new(),
        }));

        let result = service
            .require_permission(StaffId::new(), Permission::ReadUser)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
