use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Account record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub phone: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 hash, never exposed in JSON
    pub success_login: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Partial profile update. Which columns an update touches is decided
/// entirely by this value, nowhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub phone: Option<String>,
    pub name: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.name.is_none()
    }

    /// Column/value pairs this patch writes, in a fixed order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut cols = Vec::new();
        if let Some(phone) = &self.phone {
            cols.push(("phone", phone.as_str()));
        }
        if let Some(name) = &self.name {
            cols.push(("name", name.as_str()));
        }
        cols
    }
}
