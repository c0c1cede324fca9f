use clinova_application::StaffRecord;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of one staff directory entry.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/staff-member-response.ts"
)]
pub struct StaffMemberResponse {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: String,
    pub is_active: bool,
}

impl From<StaffRecord> for StaffMemberResponse {
    fn from(record: StaffRecord) -> Self {
        Self {
            id: record.id.to_string(),
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            role_id: record.role_id.to_string(),
            is_active: record.is_active,
        }
    }
}

/// Incoming payload for staff account creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-staff-request.ts"
)]
pub struct CreateStaffRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: String,
}

/// Incoming payload for staff profile updates.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-staff-request.ts"
)]
pub struct UpdateStaffRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: String,
}

#[cfg(test)]
mod tests {
    use clinova_application::StaffRecord;
    use clinova_domain::{RoleId, StaffId};

    use super::StaffMemberResponse;

    #[test]
    fn staff_response_drops_the_password_hash() {
        let record = StaffRecord {
            id: StaffId::new(),
            email: "n@clinic.org".to_owned(),
            first_name: None,
            last_name: None,
            is_active: true,
            role_id: RoleId::new(),
            password_hash: Some("$argon2id$not-a-real-hash".to_owned()),
        };

        let json = serde_json::to_string(&StaffMemberResponse::from(record));

        assert!(!json.unwrap_or_default().to_lowercase().contains("argon2id"));
    }
}
