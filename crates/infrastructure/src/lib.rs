//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod postgres_inventory_repository;
mod postgres_role_permission_repository;
mod postgres_staff_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use postgres_inventory_repository::PostgresInventoryRepository;
pub use postgres_role_permission_repository::PostgresRolePermissionRepository;
pub use postgres_staff_repository::PostgresStaffRepository;
