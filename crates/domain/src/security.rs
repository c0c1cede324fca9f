use std::str::FromStr;

use clinova_core::AppError;
use serde::{Deserialize, Serialize};

/// Permissions enforced by application policy checks.
///
/// Closed set; every grant stored on a role row must parse into one of
/// these variants. The wire and storage form is the SCREAMING_SNAKE value
/// returned by [`Permission::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Allows creating staff accounts.
    CreateUser,
    /// Allows reading the staff directory.
    ReadUser,
    /// Allows updating staff profiles and role assignments.
    UpdateUser,
    /// Allows deactivating staff accounts.
    DeleteUser,
    /// Allows reading inventory items and low-stock alerts.
    ReadInventory,
    /// Allows creating and adjusting inventory items.
    ManageInventory,
    /// Allows reading roles and the permission catalog.
    ReadRole,
    /// Allows administering role grants.
    ManageRole,
}

impl Permission {
    /// Returns the stable wire and storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateUser => "CREATE_USER",
            Self::ReadUser => "READ_USER",
            Self::UpdateUser => "UPDATE_USER",
            Self::DeleteUser => "DELETE_USER",
            Self::ReadInventory => "READ_INVENTORY",
            Self::ManageInventory => "MANAGE_INVENTORY",
            Self::ReadRole => "READ_ROLE",
            Self::ManageRole => "MANAGE_ROLE",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::CreateUser,
            Permission::ReadUser,
            Permission::UpdateUser,
            Permission::DeleteUser,
            Permission::ReadInventory,
            Permission::ManageInventory,
            Permission::ReadRole,
            Permission::ManageRole,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CREATE_USER" => Ok(Self::CreateUser),
            "READ_USER" => Ok(Self::ReadUser),
            "UPDATE_USER" => Ok(Self::UpdateUser),
            "DELETE_USER" => Ok(Self::DeleteUser),
            "READ_INVENTORY" => Ok(Self::ReadInventory),
            "MANAGE_INVENTORY" => Ok(Self::ManageInventory),
            "READ_ROLE" => Ok(Self::ReadRole),
            "MANAGE_ROLE" => Ok(Self::ManageRole),
            _ => Err(AppError::Validation(format!(
                "unknown permission value '{value}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Permission;

    #[test]
    fn permission_roundtrip_storage_value() {
        for permission in Permission::all() {
            let restored = Permission::from_str(permission.as_str());
            assert!(restored.is_ok());
            assert_eq!(restored.unwrap_or(Permission::ReadUser), *permission);
        }
    }

    #[test]
    fn unknown_permission_is_rejected() {
        let parsed = Permission::from_str("READ_EVERYTHING");
        assert!(parsed.is_err());
    }

    #[test]
    fn user_crud_permissions_use_expected_wire_values() {
        assert_eq!(Permission::CreateUser.as_str(), "CREATE_USER");
        assert_eq!(Permission::ReadUser.as_str(), "READ_USER");
        assert_eq!(Permission::UpdateUser.as_str(), "UPDATE_USER");
        assert_eq!(Permission::DeleteUser.as_str(), "DELETE_USER");
    }
}
