//! Request and response payloads exchanged with the dashboard frontend.

mod auth;
mod common;
mod inventory;
mod security;
mod staff;

pub use auth::{IdentityResponse, IdentityRoleResponse, LoginRequest};
pub use common::{
    HealthDependencyStatus, HealthResponse, MeasurementUnitCatalogResponse,
    PermissionCatalogResponse,
};
pub use inventory::{
    CreateInventoryItemRequest, InventoryItemResponse, UpdateInventoryItemRequest,
};
pub use security::RoleResponse;
pub use staff::{CreateStaffRequest, StaffMemberResponse, UpdateStaffRequest};
