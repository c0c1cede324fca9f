//! PostgreSQL-backed staff repository.

use async_trait::async_trait;
use sqlx::PgPool;

use clinova_application::{NewStaffRecord, StaffProfileUpdate, StaffRecord, StaffRepository};
use clinova_core::{AppError, AppResult};
use clinova_domain::{RoleId, StaffId};

/// PostgreSQL implementation of the staff repository port.
#[derive(Clone)]
pub struct PostgresStaffRepository {
    pool: PgPool,
}

impl PostgresStaffRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StaffRow {
    id: uuid::Uuid,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    is_active: bool,
    role_id: uuid::Uuid,
    password_hash: Option<String>,
}

impl From<StaffRow> for StaffRecord {
    fn from(row: StaffRow) -> Self {
        Self {
            id: StaffId::from_uuid(row.id),
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            is_active: row.is_active,
            role_id: RoleId::from_uuid(row.role_id),
            password_hash: row.password_hash,
        }
    }
}

const STAFF_COLUMNS: &str =
    "id, email, first_name, last_name, is_active, role_id, password_hash";

#[async_trait]
impl StaffRepository for PostgresStaffRepository {
    async fn find_by_id(&self, staff_id: StaffId) -> AppResult<Option<StaffRecord>> {
        let row = sqlx::query_as::<_, StaffRow>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff WHERE id = $1 LIMIT 1"
        ))
        .bind(staff_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find staff by id: {error}")))?;

        Ok(row.map(StaffRecord::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<StaffRecord>> {
        let row = sqlx::query_as::<_, StaffRow>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff WHERE LOWER(email) = LOWER($1) LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find staff by email: {error}")))?;

        Ok(row.map(StaffRecord::from))
    }

    async fn list(&self) -> AppResult<Vec<StaffRecord>> {
        let rows = sqlx::query_as::<_, StaffRow>(&format!(
            "SELECT {STAFF_COLUMNS} FROM staff ORDER BY email"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list staff: {error}")))?;

        Ok(rows.into_iter().map(StaffRecord::from).collect())
    }

    async fn create(&self, record: NewStaffRecord) -> AppResult<StaffId> {
        let id = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            INSERT INTO staff (email, password_hash, first_name, last_name, role_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(record.role_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| email_conflict_or_internal(error, "create staff member"))?;

        Ok(StaffId::from_uuid(id))
    }

    async fn update_profile(
        &self,
        staff_id: StaffId,
        update: StaffProfileUpdate,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE staff
            SET first_name = $2, last_name = $3, role_id = $4
            WHERE id = $1
            "#,
        )
        .bind(staff_id.as_uuid())
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(update.role_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update staff profile: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "staff member '{staff_id}' not found"
            )));
        }

        Ok(())
    }

    async fn set_active(&self, staff_id: StaffId, is_active: bool) -> AppResult<()> {
        let result = sqlx::query("UPDATE staff SET is_active = $2 WHERE id = $1")
            .bind(staff_id.as_uuid())
            .bind(is_active)
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to update staff active flag: {error}"))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "staff member '{staff_id}' not found"
            )));
        }

        Ok(())
    }
}

fn email_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("a staff account with this email already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
