//! PostgreSQL-backed role and permission repository.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;

use clinova_application::{RolePermissionRepository, RoleRecord};
use clinova_core::{AppError, AppResult};
use clinova_domain::{Permission, RoleId, StaffId};

/// PostgreSQL implementation of the role/permission repository port.
#[derive(Clone)]
pub struct PostgresRolePermissionRepository {
    pool: PgPool,
}

impl PostgresRolePermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    id: uuid::Uuid,
    name: String,
    description: String,
}

impl From<RoleRow> for RoleRecord {
    fn from(row: RoleRow) -> Self {
        Self {
            id: RoleId::from_uuid(row.id),
            name: row.name,
            description: row.description,
        }
    }
}

#[async_trait]
impl RolePermissionRepository for PostgresRolePermissionRepository {
    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<RoleRecord>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, description FROM roles WHERE id = $1 LIMIT 1",
        )
        .bind(role_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find role: {error}")))?;

        Ok(row.map(RoleRecord::from))
    }

    async fn list_roles(&self) -> AppResult<Vec<RoleRecord>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, description FROM roles ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?;

        Ok(rows.into_iter().map(RoleRecord::from).collect())
    }

    async fn list_permissions_for_role(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        let values = sqlx::query_scalar::<_, String>(
            r#"
            SELECT permission FROM role_permissions
            WHERE role_id = $1
            ORDER BY permission
            "#,
        )
        .bind(role_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list role permissions: {error}"))
        })?;

        parse_permissions(values)
    }

    async fn list_permissions_for_staff(&self, staff_id: StaffId) -> AppResult<Vec<Permission>> {
        let values = sqlx::query_scalar::<_, String>(
            r#"
            SELECT rp.permission
            FROM role_permissions rp
            JOIN staff s ON s.role_id = rp.role_id
            WHERE s.id = $1 AND s.is_active
            ORDER BY rp.permission
            "#,
        )
        .bind(staff_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list staff permissions: {error}"))
        })?;

        parse_permissions(values)
    }
}

fn parse_permissions(values: Vec<String>) -> AppResult<Vec<Permission>> {
    values
        .into_iter()
        .map(|value| {
            Permission::from_str(value.as_str()).map_err(|error| {
                AppError::Internal(format!("invalid permission value in storage: {error}"))
            })
        })
        .collect()
}
