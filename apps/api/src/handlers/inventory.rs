use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use clinova_application::{InventoryItemUpdate, NewInventoryItem};
use clinova_core::SessionPrincipal;
use clinova_domain::{InventoryItemId, MeasurementUnit};
use uuid::Uuid;

use crate::dto::{
    CreateInventoryItemRequest, InventoryItemResponse, MeasurementUnitCatalogResponse,
    UpdateInventoryItemRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_items_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
) -> ApiResult<Json<Vec<InventoryItemResponse>>> {
    let items = state
        .inventory_service
        .list_items(&principal)
        .await?
        .into_iter()
        .map(InventoryItemResponse::from)
        .collect();

    Ok(Json(items))
}

pub async fn get_item_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
    Path(item_id): Path<Uuid>,
) -> ApiResult<Json<InventoryItemResponse>> {
    let item = state
        .inventory_service
        .get_item(&principal, InventoryItemId::from_uuid(item_id))
        .await?;

    Ok(Json(InventoryItemResponse::from(item)))
}

pub async fn create_item_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
    Json(payload): Json<CreateInventoryItemRequest>,
) -> ApiResult<(StatusCode, Json<InventoryItemResponse>)> {
    let item = state
        .inventory_service
        .create_item(
            &principal,
            NewInventoryItem {
                name: payload.name,
                unit: MeasurementUnit::from_str(payload.unit.as_str())?,
                quantity: payload.quantity,
                minimum_quantity: payload.minimum_quantity,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(InventoryItemResponse::from(item))))
}

pub async fn update_item_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateInventoryItemRequest>,
) -> ApiResult<Json<InventoryItemResponse>> {
    let item = state
        .inventory_service
        .update_item(
            &principal,
            InventoryItemId::from_uuid(item_id),
            InventoryItemUpdate {
                name: payload.name,
                unit: MeasurementUnit::from_str(payload.unit.as_str())?,
                quantity: payload.quantity,
                minimum_quantity: payload.minimum_quantity,
            },
        )
        .await?;

    Ok(Json(InventoryItemResponse::from(item)))
}

pub async fn low_stock_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
) -> ApiResult<Json<Vec<InventoryItemResponse>>> {
    let items = state
        .inventory_service
        .low_stock_items(&principal)
        .await?
        .into_iter()
        .map(InventoryItemResponse::from)
        .collect();

    Ok(Json(items))
}

pub async fn measurement_units_handler() -> Json<MeasurementUnitCatalogResponse> {
    Json(MeasurementUnitCatalogResponse {
        units: MeasurementUnit::all()
            .iter()
            .map(|unit| unit.as_str().to_owned())
            .collect(),
    })
}
