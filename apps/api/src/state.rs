use clinova_application::{
    AuthService, IdentityService, InventoryService, RoleDirectoryService, StaffService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub identity_service: IdentityService,
    pub staff_service: StaffService,
    pub role_directory_service: RoleDirectoryService,
    pub inventory_service: InventoryService,
    pub postgres_pool: PgPool,
    pub frontend_url: String,
}
