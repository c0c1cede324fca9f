use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to the authenticated staff member persisted in the session.
///
/// Deliberately holds only the stable identifier plus the email used for
/// diagnostics. Role and permissions are re-read per request so a session
/// never serves stale grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPrincipal {
    staff_id: Uuid,
    email: String,
}

impl SessionPrincipal {
    /// Creates a session principal from login data.
    #[must_use]
    pub fn new(staff_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            staff_id,
            email: email.into(),
        }
    }

    /// Returns the staff identifier the session was established for.
    #[must_use]
    pub fn staff_id(&self) -> Uuid {
        self.staff_id
    }

    /// Returns the email recorded at login time.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}
