use serde::{Deserialize, Serialize};

/// Credentials posted to `/users/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Opaque bearer credential.
    pub token: String,
    pub username: String,
}

/// Account details posted to `/users/register`.
///
/// The backend answers with a free-form body, so there is no matching
/// response type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_shape() {
        let request = LoginRequest {
            username: "alice".into(),
            password: "hunter22".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "alice", "password": "hunter22"})
        );
    }

    #[test]
    fn test_login_response_deserialization() {
        let json = r#"{"token":"abc.def.ghi","username":"alice"}"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "abc.def.ghi");
        assert_eq!(response.username, "alice");
    }

    #[test]
    fn test_register_request_includes_email() {
        let request = RegisterRequest {
            username: "bob".into(),
            email: "bob@example.com".into(),
            password: "secret1".into(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"email\":\"bob@example.com\""));
    }
}
