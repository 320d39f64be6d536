use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Registered account in the user registry. Credentials and sessions live in
/// an external system; this service only reads users for display linking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateAppUser {
    pub full_name: String,
    pub email: String,
    pub role: Option<String>,
}

/// Result of matching a free-text `responsible` name against the registry.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

impl From<AppUser> for ResolvedUser {
    fn from(user: AppUser) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}
