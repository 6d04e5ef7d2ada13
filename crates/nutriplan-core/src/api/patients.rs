//! Patient management endpoints. Doctor-role only; the backend enforces
//! authorization, the client just forwards the bearer token.

use anyhow::Result;
use serde::Serialize;

use crate::models::Patient;

use super::ApiClient;

#[derive(Debug, Clone, Serialize)]
pub struct CreatePatientData {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Partial update; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePatientData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ApiClient {
    /// Fetch all patients assigned to the authenticated doctor.
    pub async fn fetch_patients(&self) -> Result<Vec<Patient>> {
        self.get("/api/patients").await
    }

    pub async fn fetch_patient(&self, id: &str) -> Result<Patient> {
        self.get(&format!("/api/patients/{}", id)).await
    }

    /// Create a patient account and assign it to the authenticated doctor.
    pub async fn create_patient(&self, data: &CreatePatientData) -> Result<Patient> {
        self.post("/api/patients", data).await
    }

    pub async fn update_patient(&self, id: &str, data: &UpdatePatientData) -> Result<Patient> {
        self.put(&format!("/api/patients/{}", id), data).await
    }

    pub async fn delete_patient(&self, id: &str) -> Result<()> {
        self.delete_empty(&format!("/api/patients/{}", id)).await
    }

    /// Assign an existing account to the authenticated doctor by email.
    pub async fn assign_patient(&self, email: &str) -> Result<Patient> {
        self.post(
            "/api/patients/assign",
            &serde_json::json!({ "email": email }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_payload_skips_unset_fields() {
        let update = UpdatePatientData {
            name: Some("Luis P. Paredes".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"name":"Luis P. Paredes"}"#);
    }
}
