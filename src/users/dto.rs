use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for account registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub phone: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Public part of the account returned to the client. The password hash
/// and timestamps never leave the service.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub phone: String,
}

/// Partial profile update; absent fields are left untouched in storage.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub phone: Option<String>,
    pub name: Option<String>,
}

/// Echo of the fields an update actually applied.
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_response_serializes_name_and_phone_only() {
        let json = serde_json::to_value(ProfileResponse {
            name: "Budi Santoso".into(),
            phone: "+62821111121".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "Budi Santoso", "phone": "+62821111121" })
        );
    }

    #[test]
    fn update_response_omits_absent_fields() {
        let json = serde_json::to_value(UpdateProfileResponse {
            phone: None,
            name: Some("Budi".into()),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Budi" }));
    }
}
