use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use clinova_core::{AppError, AppResult, SessionPrincipal};
use clinova_domain::{
    InventoryItemId, MeasurementUnit, Permission, RoleId, StaffId, is_low_stock,
};

use crate::authorization_service::{
    AuthorizationService, RolePermissionRepository, RoleRecord,
};

use super::{
    InventoryItemRecord, InventoryItemUpdate, InventoryRepository, InventoryService,
    NewInventoryItem,
};

#[derive(Default)]
struct FakeInventoryRepository {
    items: Mutex<Vec<InventoryItemRecord>>,
}

#[async_trait]
impl InventoryRepository for FakeInventoryRepository {
    async fn list_items(&self) -> AppResult<Vec<InventoryItemRecord>> {
        Ok(self.items.lock().await.clone())
    }

    async fn find_item(
        &self,
        item_id: InventoryItemId,
    ) -> AppResult<Option<InventoryItemRecord>> {
        Ok(self
            .items
            .lock()
            .await
            .iter()
            .find(|item| item.id == item_id)
            .cloned())
    }

    async fn create_item(&self, item: NewInventoryItem) -> AppResult<InventoryItemId> {
        let item_id = InventoryItemId::new();
        self.items.lock().await.push(InventoryItemRecord {
            id: item_id,
            name: item.name,
            unit: item.unit,
            quantity: item.quantity,
            minimum_quantity: item.minimum_quantity,
            updated_at: Utc::now(),
        });
        Ok(item_id)
    }

    async fn update_item(
        &self,
        item_id: InventoryItemId,
        update: InventoryItemUpdate,
    ) -> AppResult<()> {
        let mut items = self.items.lock().await;
        let Some(item) = items.iter_mut().find(|item| item.id == item_id) else {
            return Err(AppError::NotFound("inventory item not found".to_owned()));
        };
        item.name = update.name;
        item.unit = update.unit;
        item.quantity = update.quantity;
        item.minimum_quantity = update.minimum_quantity;
        item.updated_at = Utc::now();
        Ok(())
    }

    async fn list_low_stock_items(&self) -> AppResult<Vec<InventoryItemRecord>> {
        Ok(self
            .items
            .lock()
            .await
            .iter()
            .filter(|item| is_low_stock(item.quantity, item.minimum_quantity))
            .cloned()
            .collect())
    }
}

struct FakeRolePermissionRepository {
    staff_grants: HashMap<StaffId, Vec<Permission>>,
}

#[async_trait]
impl RolePermissionRepository for FakeRolePermissionRepository {
    async fn find_role(&self, _role_id: RoleId) -> AppResult<Option<RoleRecord>> {
        Ok(None)
    }

    async fn list_roles(&self) -> AppResult<Vec<RoleRecord>> {
        Ok(Vec::new())
    }

    async fn list_permissions_for_role(&self, _role_id: RoleId) -> AppResult<Vec<Permission>> {
        Ok(Vec::new())
    }

    async fn list_permissions_for_staff(&self, staff_id: StaffId) -> AppResult<Vec<Permission>> {
        Ok(self
            .staff_grants
            .get(&staff_id)
            .cloned()
            .unwrap_or_default())
    }
}

fn actor() -> SessionPrincipal {
    SessionPrincipal::new(StaffId::new().as_uuid(), "stock@clinic.org")
}

fn service_with_permissions(
    actor: &SessionPrincipal,
    permissions: Vec<Permission>,
) -> (InventoryService, Arc<FakeInventoryRepository>) {
    let repository = Arc::new(FakeInventoryRepository::default());
    let role_repository = Arc::new(FakeRolePermissionRepository {
        staff_grants: HashMap::from([(StaffId::from_uuid(actor.staff_id()), permissions)]),
    });
    let service = InventoryService::new(
        repository.clone(),
        AuthorizationService::new(role_repository),
    );
    (service, repository)
}

fn gauze(quantity: i32, minimum_quantity: i32) -> NewInventoryItem {
    NewInventoryItem {
        name: "Sterile gauze".to_owned(),
        unit: MeasurementUnit::Pack,
        quantity,
        minimum_quantity,
    }
}

#[tokio::test]
async fn list_items_requires_read_permission() {
    let actor = actor();
    let (service, _) = service_with_permissions(&actor, Vec::new());

    let result = service.list_items(&actor).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn create_item_requires_manage_permission() {
    let actor = actor();
    let (service, _) = service_with_permissions(&actor, vec![Permission::ReadInventory]);

    let result = service.create_item(&actor, gauze(20, 5)).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn create_item_rejects_negative_quantity() {
    let actor = actor();
    let (service, _) = service_with_permissions(&actor, vec![Permission::ManageInventory]);

    let result = service.create_item(&actor, gauze(-1, 5)).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn create_item_rejects_blank_name() {
    let actor = actor();
    let (service, _) = service_with_permissions(&actor, vec![Permission::ManageInventory]);

    let mut item = gauze(20, 5);
    item.name = "   ".to_owned();
    let result = service.create_item(&actor, item).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn update_unknown_item_is_not_found() {
    let actor = actor();
    let (service, _) = service_with_permissions(&actor, vec![Permission::ManageInventory]);

    let result = service
        .update_item(
            &actor,
            InventoryItemId::new(),
            InventoryItemUpdate {
                name: "Sterile gauze".to_owned(),
                unit: MeasurementUnit::Pack,
                quantity: 10,
                minimum_quantity: 5,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn low_stock_listing_returns_only_depleted_items() {
    let actor = actor();
    let (service, _) = service_with_permissions(
        &actor,
        vec![Permission::ReadInventory, Permission::ManageInventory],
    );

    let plenty = service.create_item(&actor, gauze(50, 5)).await;
    assert!(plenty.is_ok());

    let mut low = gauze(3, 5);
    low.name = "Insulin vials".to_owned();
    low.unit = MeasurementUnit::Vial;
    let low = service.create_item(&actor, low).await;
    assert!(low.is_ok());

    let alerts = service.low_stock_items(&actor).await;

    let Ok(alerts) = alerts else {
        panic!("expected the low-stock listing to succeed");
    };
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].name, "Insulin vials");
}

#[tokio::test]
async fn stock_adjustment_moves_item_out_of_alerts() {
    let actor = actor();
    let (service, _) = service_with_permissions(
        &actor,
        vec![Permission::ReadInventory, Permission::ManageInventory],
    );

    let created = service.create_item(&actor, gauze(2, 5)).await;
    let Ok(created) = created else {
        panic!("expected item creation to succeed");
    };

    let updated = service
        .update_item(
            &actor,
            created.id,
            InventoryItemUpdate {
                name: created.name.clone(),
                unit: created.unit,
                quantity: 40,
                minimum_quantity: created.minimum_quantity,
            },
        )
        .await;
    assert!(updated.is_ok());

    let alerts = service.low_stock_items(&actor).await;
    let Ok(alerts) = alerts else {
        panic!("expected the low-stock listing to succeed");
    };
    assert!(alerts.is_empty());
}
