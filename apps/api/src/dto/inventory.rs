use clinova_application::InventoryItemRecord;
use clinova_domain::is_low_stock;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of one inventory item.
///
/// `is_low_stock` is computed server-side so the dashboard alert banner
/// needs no client-side threshold logic.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/inventory-item-response.ts"
)]
pub struct InventoryItemResponse {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub quantity: i32,
    pub minimum_quantity: i32,
    pub is_low_stock: bool,
    pub updated_at: String,
}

impl From<InventoryItemRecord> for InventoryItemResponse {
    fn from(record: InventoryItemRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            unit: record.unit.as_str().to_owned(),
            quantity: record.quantity,
            minimum_quantity: record.minimum_quantity,
            is_low_stock: is_low_stock(record.quantity, record.minimum_quantity),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

/// Incoming payload for inventory item creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-inventory-item-request.ts"
)]
pub struct CreateInventoryItemRequest {
    pub name: String,
    pub unit: String,
    pub quantity: i32,
    pub minimum_quantity: i32,
}

/// Incoming payload for inventory item updates.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-inventory-item-request.ts"
)]
pub struct UpdateInventoryItemRequest {
    pub name: String,
    pub unit: String,
    pub quantity: i32,
    pub minimum_quantity: i32,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use clinova_application::InventoryItemRecord;
    use clinova_domain::{InventoryItemId, MeasurementUnit};

    use super::InventoryItemResponse;

    #[test]
    fn depleted_item_is_flagged_low_stock() {
        let record = InventoryItemRecord {
            id: InventoryItemId::new(),
            name: "Insulin vials".to_owned(),
            unit: MeasurementUnit::Vial,
            quantity: 2,
            minimum_quantity: 5,
            updated_at: Utc::now(),
        };

        let response = InventoryItemResponse::from(record);

        assert!(response.is_low_stock);
        assert_eq!(response.unit, "vial");
    }
}
