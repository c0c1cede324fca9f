use std::sync::Arc;

use clinova_core::{AppResult, SessionPrincipal};
use clinova_domain::{Permission, StaffId};

use crate::authorization_service::{
    AuthorizationService, RolePermissionRepository, RoleRecord,
};

/// Role projection including its effective grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleWithPermissions {
    /// The role row.
    pub role: RoleRecord,
    /// Permissions granted by the role.
    pub permissions: Vec<Permission>,
}

/// Application service for the roles/permissions dashboard page.
#[derive(Clone)]
pub struct RoleDirectoryService {
    role_repository: Arc<dyn RolePermissionRepository>,
    authorization_service: AuthorizationService,
}

impl RoleDirectoryService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        role_repository: Arc<dyn RolePermissionRepository>,
        authorization_service: AuthorizationService,
    ) -> Self {
        Self {
            role_repository,
            authorization_service,
        }
    }

    /// Lists all roles with their effective grants.
    pub async fn list_roles(
        &self,
        actor: &SessionPrincipal,
    ) -> AppResult<Vec<RoleWithPermissions>> {
        self.authorization_service
            .require_permission(StaffId::from_uuid(actor.staff_id()), Permission::ReadRole)
            .await?;

        let roles = self.role_repository.list_roles().await?;

        let mut projections = Vec::with_capacity(roles.len());
        for role in roles {
            let permissions = self
                .role_repository
                .list_permissions_for_role(role.id)
                .await?;
            projections.push(RoleWithPermissions { role, permissions });
        }

        Ok(projections)
    }

    /// Returns the closed permission catalog.
    pub async fn permission_catalog(
        &self,
        actor: &SessionPrincipal,
    ) -> AppResult<&'static [Permission]> {
        self.authorization_service
            .require_permission(StaffId::from_uuid(actor.staff_id()), Permission::ReadRole)
            .await?;

        Ok(Permission::all())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    use clinova_core::{AppError, AppResult, SessionPrincipal};
    use clinova_domain::{Permission, RoleId, StaffId};

    use crate::authorization_service::{
        AuthorizationService, RolePermissionRepository, RoleRecord,
    };

    use super::RoleDirectoryService;

    struct FakeRolePermissionRepository {
        roles: Vec<RoleRecord>,
        role_grants: HashMap<RoleId, Vec<Permission>>,
        staff_grants: HashMap<StaffId, Vec<Permission>>,
    }

    #[async_trait]
    impl RolePermissionRepository for FakeRolePermissionRepository {
        async fn find_role(&self, role_id: RoleId) -> AppResult<Option<RoleRecord>> {
            Ok(self.roles.iter().find(|role| role.id == role_id).cloned())
        }

        async fn list_roles(&self) -> AppResult<Vec<RoleRecord>> {
            Ok(self.roles.clone())
        }

        async fn list_permissions_for_role(
            &self,
            role_id: RoleId,
        ) -> AppResult<Vec<Permission>> {
            Ok(self.role_grants.get(&role_id).cloned().unwrap_or_default())
        }

        async fn list_permissions_for_staff(
            &self,
            staff_id: StaffId,
        ) -> AppResult<Vec<Permission>> {
            Ok(self
                .staff_grants
                .get(&staff_id)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn service_with_roles(
        actor: &SessionPrincipal,
        actor_permissions: Vec<Permission>,
        roles: Vec<RoleRecord>,
        role_grants: HashMap<RoleId, Vec<Permission>>,
    ) -> RoleDirectoryService {
        let repository = Arc::new(FakeRolePermissionRepository {
            roles,
            role_grants,
            staff_grants: HashMap::from([(
                StaffId::from_uuid(actor.staff_id()),
                actor_permissions,
            )]),
        });
        RoleDirectoryService::new(repository.clone(), AuthorizationService::new(repository))
    }

    #[tokio::test]
    async fn list_roles_requires_read_role_permission() {
        let actor = SessionPrincipal::new(StaffId::new().as_uuid(), "r@clinic.org");
        let service = service_with_roles(&actor, Vec::new(), Vec::new(), HashMap::new());

        let result = service.list_roles(&actor).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn list_roles_attaches_role_grants() {
        let actor = SessionPrincipal::new(StaffId::new().as_uuid(), "r@clinic.org");
        let role = RoleRecord {
            id: RoleId::new(),
            name: "receptionist".to_owned(),
            description: "Front-desk staff".to_owned(),
        };
        let service = service_with_roles(
            &actor,
            vec![Permission::ReadRole],
            vec![role.clone()],
            HashMap::from([(role.id, vec![Permission::ReadUser])]),
        );

        let listed = service.list_roles(&actor).await;

        let Ok(listed) = listed else {
            panic!("expected role listing to succeed");
        };
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].role.name, "receptionist");
        assert_eq!(listed[0].permissions, vec![Permission::ReadUser]);
    }

    #[tokio::test]
    async fn permission_catalog_lists_every_permission() {
        let actor = SessionPrincipal::new(StaffId::new().as_uuid(), "r@clinic.org");
        let service =
            service_with_roles(&actor, vec![Permission::ReadRole], Vec::new(), HashMap::new());

        let catalog = service.permission_catalog(&actor).await;

        let Ok(catalog) = catalog else {
            panic!("expected catalog to be readable");
        };
        assert_eq!(catalog.len(), Permission::all().len());
    }
}
