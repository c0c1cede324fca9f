//! Inventory ports and application service.
//!
//! Backs the inventory dashboard page: item listing, stock adjustments,
//! and the low-stock feed the alert banner is rendered from.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use clinova_core::{AppError, AppResult, NonEmptyString, SessionPrincipal};
use clinova_domain::{InventoryItemId, MeasurementUnit, Permission, StaffId};

use crate::authorization_service::AuthorizationService;

/// Inventory item returned by repository queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItemRecord {
    /// Unique item identifier.
    pub id: InventoryItemId,
    /// Display name of the item.
    pub name: String,
    /// Unit the quantity is counted in.
    pub unit: MeasurementUnit,
    /// On-hand quantity.
    pub quantity: i32,
    /// Threshold at which the item counts as low stock.
    pub minimum_quantity: i32,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new inventory item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInventoryItem {
    /// Display name of the item.
    pub name: String,
    /// Unit the quantity is counted in.
    pub unit: MeasurementUnit,
    /// Initial on-hand quantity.
    pub quantity: i32,
    /// Low-stock threshold.
    pub minimum_quantity: i32,
}

/// Replacement payload for an existing inventory item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItemUpdate {
    /// New display name.
    pub name: String,
    /// New measurement unit.
    pub unit: MeasurementUnit,
    /// New on-hand quantity.
    pub quantity: i32,
    /// New low-stock threshold.
    pub minimum_quantity: i32,
}

/// Repository port for inventory persistence.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Lists all inventory items.
    async fn list_items(&self) -> AppResult<Vec<InventoryItemRecord>>;

    /// Finds one item by its identifier.
    async fn find_item(
        &self,
        item_id: InventoryItemId,
    ) -> AppResult<Option<InventoryItemRecord>>;

    /// Creates a new item row. Returns the assigned identifier.
    async fn create_item(&self, item: NewInventoryItem) -> AppResult<InventoryItemId>;

    /// Replaces the mutable fields of an item row.
    async fn update_item(
        &self,
        item_id: InventoryItemId,
        update: InventoryItemUpdate,
    ) -> AppResult<()>;

    /// Lists items whose quantity has reached their minimum.
    async fn list_low_stock_items(&self) -> AppResult<Vec<InventoryItemRecord>>;
}

/// Application service for inventory administration.
#[derive(Clone)]
pub struct InventoryService {
    repository: Arc<dyn InventoryRepository>,
    authorization_service: AuthorizationService,
}

impl InventoryService {
    /// Creates a new inventory service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn InventoryRepository>,
        authorization_service: AuthorizationService,
    ) -> Self {
        Self {
            repository,
            authorization_service,
        }
    }

    /// Lists the full inventory.
    pub async fn list_items(
        &self,
        actor: &SessionPrincipal,
    ) -> AppResult<Vec<InventoryItemRecord>> {
        self.require(actor, Permission::ReadInventory).await?;
        self.repository.list_items().await
    }

    /// Returns one inventory item.
    pub async fn get_item(
        &self,
        actor: &SessionPrincipal,
        item_id: InventoryItemId,
    ) -> AppResult<InventoryItemRecord> {
        self.require(actor, Permission::ReadInventory).await?;

        self.repository
            .find_item(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("inventory item '{item_id}' not found")))
    }

    /// Creates an inventory item.
    pub async fn create_item(
        &self,
        actor: &SessionPrincipal,
        item: NewInventoryItem,
    ) -> AppResult<InventoryItemRecord> {
        self.require(actor, Permission::ManageInventory).await?;

        NonEmptyString::new(item.name.as_str())?;
        validate_quantities(item.quantity, item.minimum_quantity)?;

        let item_id = self.repository.create_item(item).await?;

        self.repository.find_item(item_id).await?.ok_or_else(|| {
            AppError::Internal(format!(
                "created inventory item '{item_id}' could not be read back"
            ))
        })
    }

    /// Replaces the mutable fields of an item.
    pub async fn update_item(
        &self,
        actor: &SessionPrincipal,
        item_id: InventoryItemId,
        update: InventoryItemUpdate,
    ) -> AppResult<InventoryItemRecord> {
        self.require(actor, Permission::ManageInventory).await?;

        NonEmptyString::new(update.name.as_str())?;
        validate_quantities(update.quantity, update.minimum_quantity)?;

        if self.repository.find_item(item_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "inventory item '{item_id}' not found"
            )));
        }

        self.repository.update_item(item_id, update).await?;

        self.repository.find_item(item_id).await?.ok_or_else(|| {
            AppError::Internal(format!(
                "updated inventory item '{item_id}' could not be read back"
            ))
        })
    }

    /// Lists items currently at or below their minimum quantity.
    pub async fn low_stock_items(
        &self,
        actor: &SessionPrincipal,
    ) -> AppResult<Vec<InventoryItemRecord>> {
        self.require(actor, Permission::ReadInventory).await?;
        self.repository.list_low_stock_items().await
    }

    async fn require(&self, actor: &SessionPrincipal, permission: Permission) -> AppResult<()> {
        self.authorization_service
            .require_permission(StaffId::from_uuid(actor.staff_id()), permission)
            .await
    }
}

fn validate_quantities(quantity: i32, minimum_quantity: i32) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::Validation(
            "quantity must not be negative".to_owned(),
        ));
    }

    if minimum_quantity < 0 {
        return Err(AppError::Validation(
            "minimum quantity must not be negative".to_owned(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests;
