use clinova_application::RoleWithPermissions;
use serde::Serialize;
use ts_rs::TS;

/// API representation of a role and its grants.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

impl From<RoleWithPermissions> for RoleResponse {
    fn from(value: RoleWithPermissions) -> Self {
        Self {
            id: value.role.id.to_string(),
            name: value.role.name,
            description: value.role.description,
            permissions: value
                .permissions
                .into_iter()
                .map(|permission| permission.as_str().to_owned())
                .collect(),
        }
    }
}
