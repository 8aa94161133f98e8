use serde::{Deserialize, Serialize};

/// Error body returned by the backend.
///
/// The backend is not strict about the shape of its error bodies: some
/// handlers answer with JSON, others with a bare string. [`ErrorResponse::describe`]
/// accepts either.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,
    /// Short reason phrase, e.g. `"Unauthorized"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Extra context some handlers append, e.g. the offending field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Turns a raw response body into a message fit for display.
    ///
    /// JSON bodies yield their `message` (falling back to `error`), any other
    /// non-blank body is returned trimmed, and a blank body yields `None`.
    pub fn describe(body: &str) -> Option<String> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }

        match serde_json::from_str::<Self>(trimmed) {
            Ok(parsed) if !parsed.message.trim().is_empty() => Some(parsed.to_string()),
            Ok(Self {
                error: Some(error), ..
            }) if !error.trim().is_empty() => Some(error),
            Ok(_) if trimmed.starts_with('{') => None,
            _ => Some(trimmed.trim_matches('"').to_string()),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_appends_details() {
        let body = r#"{"message":"Validation failed","details":"amount must be positive"}"#;
        assert_eq!(
            ErrorResponse::describe(body).as_deref(),
            Some("Validation failed: amount must be positive")
        );
    }

    #[test]
    fn test_describe_json_message() {
        let body = r#"{"status":400,"error":"Bad Request","message":"Username already taken"}"#;
        assert_eq!(
            ErrorResponse::describe(body).as_deref(),
            Some("Username already taken")
        );
    }

    #[test]
    fn test_describe_falls_back_to_reason_phrase() {
        let body = r#"{"status":500,"error":"Internal Server Error"}"#;
        assert_eq!(
            ErrorResponse::describe(body).as_deref(),
            Some("Internal Server Error")
        );
    }

    #[test]
    fn test_describe_plain_text_body() {
        assert_eq!(
            ErrorResponse::describe("  Invalid username or password\n").as_deref(),
            Some("Invalid username or password")
        );
    }

    #[test]
    fn test_describe_json_string_body() {
        assert_eq!(
            ErrorResponse::describe("\"User already exists\"").as_deref(),
            Some("User already exists")
        );
    }

    #[test]
    fn test_describe_blank_body() {
        assert_eq!(ErrorResponse::describe(""), None);
        assert_eq!(ErrorResponse::describe("   "), None);
        assert_eq!(ErrorResponse::describe("{}"), None);
    }
}
