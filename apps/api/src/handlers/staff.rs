use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use clinova_application::{CreateStaffInput, StaffProfileUpdate};
use clinova_core::{AppError, SessionPrincipal};
use clinova_domain::{RoleId, StaffId};
use uuid::Uuid;

use crate::dto::{CreateStaffRequest, StaffMemberResponse, UpdateStaffRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_staff_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
) -> ApiResult<Json<Vec<StaffMemberResponse>>> {
    let staff = state
        .staff_service
        .list_staff(&principal)
        .await?
        .into_iter()
        .map(StaffMemberResponse::from)
        .collect();

    Ok(Json(staff))
}

pub async fn get_staff_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
    Path(staff_id): Path<Uuid>,
) -> ApiResult<Json<StaffMemberResponse>> {
    let staff = state
        .staff_service
        .get_staff(&principal, StaffId::from_uuid(staff_id))
        .await?;

    Ok(Json(StaffMemberResponse::from(staff)))
}

pub async fn create_staff_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
    Json(payload): Json<CreateStaffRequest>,
) -> ApiResult<(StatusCode, Json<StaffMemberResponse>)> {
    let staff = state
        .staff_service
        .create_staff(
            &principal,
            CreateStaffInput {
                email: payload.email,
                password: payload.password,
                first_name: payload.first_name,
                last_name: payload.last_name,
                role_id: parse_role_id(&payload.role_id)?,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(StaffMemberResponse::from(staff))))
}

pub async fn update_staff_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
    Path(staff_id): Path<Uuid>,
    Json(payload): Json<UpdateStaffRequest>,
) -> ApiResult<Json<StaffMemberResponse>> {
    let staff = state
        .staff_service
        .update_staff(
            &principal,
            StaffId::from_uuid(staff_id),
            StaffProfileUpdate {
                first_name: payload.first_name,
                last_name: payload.last_name,
                role_id: parse_role_id(&payload.role_id)?,
            },
        )
        .await?;

    Ok(Json(StaffMemberResponse::from(staff)))
}

pub async fn deactivate_staff_handler(
    State(state): State<AppState>,
    Extension(principal): Extension<SessionPrincipal>,
    Path(staff_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .staff_service
        .deactivate_staff(&principal, StaffId::from_uuid(staff_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_role_id(value: &str) -> Result<RoleId, AppError> {
    Uuid::parse_str(value)
        .map(RoleId::from_uuid)
        .map_err(|error| AppError::Validation(format!("invalid role id: {error}")))
}
