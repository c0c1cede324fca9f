//! Application services and ports.

#![forbid(unsafe_code)]

mod auth_service;
mod authorization_service;
mod identity_service;
mod inventory_service;
mod role_directory_service;
mod staff_service;

pub use auth_service::{AuthService, LoginOutcome, PasswordHasher};
pub use authorization_service::{AuthorizationService, RolePermissionRepository, RoleRecord};
pub use identity_service::{CurrentIdentity, IdentityResolution, IdentityService};
pub use inventory_service::{
    InventoryItemRecord, InventoryItemUpdate, InventoryRepository, InventoryService,
    NewInventoryItem,
};
pub use role_directory_service::{RoleDirectoryService, RoleWithPermissions};
pub use staff_service::{
    CreateStaffInput, NewStaffRecord, StaffProfileUpdate, StaffRecord, StaffRepository,
    StaffService,
};
