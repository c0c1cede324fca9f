use axum::extract::State;
use axum::{Extension, Json};
use clinova_core::SessionPrincipal;

use crate::dto::{PermissionCatalogResponse, RoleResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .role_directory_service
        .list_roles(&principal)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn permission_catalog_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
) -> ApiResult<Json<PermissionCatalogResponse>> {
    let permissions = state
        .role_directory_service
        .permission_catalog(&principal)
        .await?
        .iter()
        .map(|permission| permission.as_str().to_owned())
        .collect();

    Ok(Json(PermissionCatalogResponse { permissions }))
}
