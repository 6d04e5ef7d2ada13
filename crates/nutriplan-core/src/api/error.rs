use thiserror::Error;

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized{}", message_suffix(.message))]
    Unauthorized { message: Option<String> },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Pull the human-readable message out of an error body.
    /// The backend sends `{"error": "..."}`; some routes use `"message"`.
    fn extract_message(body: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("error")
            .or_else(|| value.get("message"))
            .and_then(|m| m.as_str())
            .map(|m| m.to_string())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::extract_message(body);
        let display = message.clone().unwrap_or_else(|| Self::truncate_body(body));
        match status.as_u16() {
            401 => ApiError::Unauthorized { message },
            400 | 422 => ApiError::Validation(display),
            403 => ApiError::AccessDenied(display),
            404 => ApiError::NotFound(display),
            500..=599 => ApiError::ServerError(display),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, display)),
        }
    }

    /// Server-provided message suitable for showing to the user, when the
    /// response carried one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } => message.as_deref(),
            ApiError::Validation(m)
            | ApiError::AccessDenied(m)
            | ApiError::NotFound(m)
            | ApiError::ServerError(m) => Some(m.as_str()),
            ApiError::Network(_) | ApiError::InvalidResponse(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_maps_taxonomy() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_REQUEST, "{\"error\":\"bad\"}"),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "missing"),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ApiError::ServerError(_)
        ));
    }

    #[test]
    fn test_server_message_extracted_from_error_field() {
        let err = ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"error": "Invalid credentials"}"#,
        );
        assert_eq!(err.user_message(), Some("Invalid credentials"));
        assert_eq!(err.to_string(), "Unauthorized: Invalid credentials");
    }

    #[test]
    fn test_message_field_fallback() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message": "email already registered"}"#,
        );
        assert_eq!(err.user_message(), Some("email already registered"));
    }

    #[test]
    fn test_non_json_body_kept_truncated() {
        let long_body = "x".repeat(600);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &long_body);
        let message = err.user_message().unwrap();
        assert!(message.contains("truncated"));
        assert!(message.len() < 600);
    }

    #[test]
    fn test_unauthorized_without_body_has_no_user_message() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(err.user_message().is_none());
        assert!(err.is_unauthorized());
    }
}
