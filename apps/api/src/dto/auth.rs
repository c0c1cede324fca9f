use clinova_application::CurrentIdentity;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for email/password login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Nested role object of the identity response.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/identity-role-response.ts"
)]
pub struct IdentityRoleResponse {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// API representation of the authenticated staff member.
///
/// Assembled fresh per request; never carries credential material.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/identity-response.ts"
)]
pub struct IdentityResponse {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: IdentityRoleResponse,
    pub permissions: Vec<String>,
    pub is_active: bool,
}

impl From<CurrentIdentity> for IdentityResponse {
    fn from(identity: CurrentIdentity) -> Self {
        Self {
            id: identity.staff_id.to_string(),
            email: identity.email,
            first_name: identity.first_name,
            last_name: identity.last_name,
            role: IdentityRoleResponse {
                id: identity.role.id.to_string(),
                name: identity.role.name,
                description: identity.role.description,
            },
            permissions: identity
                .permissions
                .into_iter()
                .map(|permission| permission.as_str().to_owned())
                .collect(),
            is_active: identity.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use clinova_application::{CurrentIdentity, RoleRecord};
    use clinova_domain::{Permission, RoleId, StaffId};

    use super::IdentityResponse;

    fn admin_identity() -> CurrentIdentity {
        CurrentIdentity {
            staff_id: StaffId::new(),
            email: "u1@clinic.org".to_owned(),
            first_name: Some("Ada".to_owned()),
            last_name: Some("Okafor".to_owned()),
            is_active: true,
            role: RoleRecord {
                id: RoleId::new(),
                name: "admin".to_owned(),
                description: "Full administrative access".to_owned(),
            },
            permissions: vec![
                Permission::CreateUser,
                Permission::ReadUser,
                Permission::UpdateUser,
                Permission::DeleteUser,
            ],
        }
    }

    #[test]
    fn identity_response_matches_the_wire_contract() {
        let response = IdentityResponse::from(admin_identity());
        let json = serde_json::to_value(&response).unwrap_or_default();

        assert_eq!(json["email"], "u1@clinic.org");
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Okafor");
        assert_eq!(json["role"]["name"], "admin");
        assert_eq!(json["isActive"], true);
        assert_eq!(
            json["permissions"],
            serde_json::json!(["CREATE_USER", "READ_USER", "UPDATE_USER", "DELETE_USER"])
        );
    }

    #[test]
    fn identity_response_never_contains_credentials() {
        let response = IdentityResponse::from(admin_identity());
        let json = serde_json::to_string(&response).unwrap_or_default();

        assert!(!json.to_lowercase().contains("password"));
        assert!(!json.to_lowercase().contains("hash"));
        assert!(!json.to_lowercase().contains("secret"));
    }

    #[test]
    fn identity_response_serializes_identically_for_the_same_identity() {
        let identity = admin_identity();
        let first = serde_json::to_string(&IdentityResponse::from(identity.clone()));
        let second = serde_json::to_string(&IdentityResponse::from(identity));

        assert_eq!(first.unwrap_or_default(), second.unwrap_or_default());
    }
}
