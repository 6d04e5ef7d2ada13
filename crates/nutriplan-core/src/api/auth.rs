//! Authentication endpoints.
//!
//! Login and register run unauthenticated through the normal pipeline;
//! the refresh exchange lives in the pipeline itself (`client.rs`) because
//! it must not be intercepted.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::{Role, User};

use super::ApiClient;

#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payload of a successful login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// Rotated token pair returned by the refresh endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

impl ApiClient {
    /// Authenticate with email and password.
    pub async fn login(&self, data: &LoginData) -> Result<AuthResponse> {
        self.post("/api/auth/login", data).await
    }

    /// Create a new account. The response carries tokens but callers are
    /// expected to send the user through login rather than auto-login.
    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse> {
        self.post("/api/auth/register", data).await
    }

    /// Fetch the authenticated user's profile.
    pub async fn get_profile(&self) -> Result<User> {
        self.get("/api/auth/profile").await
    }

    /// Invalidate the refresh token server-side.
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        self.post_empty(
            "/api/auth/logout",
            &serde_json::json!({ "refreshToken": refresh_token }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_payload_omits_absent_phone() {
        let data = RegisterData {
            email: "luis@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            name: "Luis Paredes".to_string(),
            role: Role::Patient,
            phone: None,
        };
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["role"], "PATIENT");
        assert!(value.get("phone").is_none());
    }

    #[test]
    fn test_parse_auth_response() {
        let json = r#"{
            "user": {
                "id": "doc_1",
                "email": "ana@example.com",
                "name": "Ana Torres",
                "role": "DOCTOR",
                "phone": null,
                "avatar": null,
                "createdAt": "2025-11-02T10:15:30.000Z",
                "updatedAt": "2025-11-02T10:15:30.000Z"
            },
            "accessToken": "A1",
            "refreshToken": "R1"
        }"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.access_token, "A1");
        assert!(auth.user.role.is_doctor());
    }
}
