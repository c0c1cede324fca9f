//! PostgreSQL-backed inventory repository.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;

use clinova_application::{
    InventoryItemRecord, InventoryItemUpdate, InventoryRepository, NewInventoryItem,
};
use clinova_core::{AppError, AppResult};
use clinova_domain::{InventoryItemId, MeasurementUnit};

/// PostgreSQL implementation of the inventory repository port.
#[derive(Clone)]
pub struct PostgresInventoryRepository {
    pool: PgPool,
}

impl PostgresInventoryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InventoryItemRow {
    id: uuid::Uuid,
    name: String,
    unit: String,
    quantity: i32,
    minimum_quantity: i32,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<InventoryItemRow> for InventoryItemRecord {
    type Error = AppError;

    fn try_from(row: InventoryItemRow) -> Result<Self, Self::Error> {
        let unit = MeasurementUnit::from_str(row.unit.as_str()).map_err(|error| {
            AppError::Internal(format!("invalid measurement unit in storage: {error}"))
        })?;

        Ok(Self {
            id: InventoryItemId::from_uuid(row.id),
            name: row.name,
            unit,
            quantity: row.quantity,
            minimum_quantity: row.minimum_quantity,
            updated_at: row.updated_at,
        })
    }
}

const ITEM_COLUMNS: &str = "id, name, unit, quantity, minimum_quantity, updated_at";

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn list_items(&self) -> AppResult<Vec<InventoryItemRecord>> {
        let rows = sqlx::query_as::<_, InventoryItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list inventory: {error}")))?;

        rows.into_iter().map(InventoryItemRecord::try_from).collect()
    }

    async fn find_item(
        &self,
        item_id: InventoryItemId,
    ) -> AppResult<Option<InventoryItemRecord>> {
        let row = sqlx::query_as::<_, InventoryItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM inventory_items WHERE id = $1 LIMIT 1"
        ))
        .bind(item_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find inventory item: {error}")))?;

        row.map(InventoryItemRecord::try_from).transpose()
    }

    async fn create_item(&self, item: NewInventoryItem) -> AppResult<InventoryItemId> {
        let id = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            INSERT INTO inventory_items (name, unit, quantity, minimum_quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&item.name)
        .bind(item.unit.as_str())
        .bind(item.quantity)
        .bind(item.minimum_quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to create inventory item: {error}"))
        })?;

        Ok(InventoryItemId::from_uuid(id))
    }

    async fn update_item(
        &self,
        item_id: InventoryItemId,
        update: InventoryItemUpdate,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET name = $2, unit = $3, quantity = $4, minimum_quantity = $5,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(item_id.as_uuid())
        .bind(&update.name)
        .bind(update.unit.as_str())
        .bind(update.quantity)
        .bind(update.minimum_quantity)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update inventory item: {error}"))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "inventory item '{item_id}' not found"
            )));
        }

        Ok(())
    }

    async fn list_low_stock_items(&self) -> AppResult<Vec<InventoryItemRecord>> {
        let rows = sqlx::query_as::<_, InventoryItemRow>(&format!(
            r#"
            SELECT {ITEM_COLUMNS} FROM inventory_items
            WHERE quantity <= minimum_quantity
            ORDER BY name
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list low-stock items: {error}"))
        })?;

        rows.into_iter().map(InventoryItemRecord::try_from).collect()
    }
}
