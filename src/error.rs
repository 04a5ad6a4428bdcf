use serde_json::Value;

/// Everything a call against the IntroBook backend can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid server URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("not signed in")]
    NotSignedIn,
}

impl ApiError {
    /// Text suitable for an inline error label or a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Rejected(message) => message.clone(),
            ApiError::Http(_) => "Could not reach the server. Please try again.".to_string(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Url(_) => "The configured server URL is invalid.".to_string(),
            ApiError::NotSignedIn => "Please sign in again.".to_string(),
        }
    }

    /// Server supplied message or the given fallback, for views that show their own wording.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected(message) if !message.is_empty() => {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

/// Pulls a human readable message out of an error body.
pub fn extract_message(body: &Value) -> Option<String> {
    first_message(body, &["error", "message", "detail"])
}

/// Message of a `success: false` envelope, where `message` wins over `error`.
pub fn rejection_message(body: &Value) -> Option<String> {
    first_message(body, &["message", "error", "detail"])
}

fn first_message(body: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| body.get(*key))
        .find_map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(items) => items.first().and_then(|i| i.as_str()).map(str::to_string),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_message_prefers_error_key() {
        let body = json!({"message": "m", "error": "e"});
        assert_eq!(extract_message(&body).as_deref(), Some("e"));
    }

    #[test]
    fn rejection_prefers_message_key() {
        let body = json!({"success": false, "message": "m", "error": "e"});
        assert_eq!(rejection_message(&body).as_deref(), Some("m"));
        assert_eq!(rejection_message(&json!({"success": false, "error": "e"})).as_deref(), Some("e"));
    }

    #[test]
    fn extract_message_reads_detail_and_lists() {
        assert_eq!(extract_message(&json!({"detail": "Profile not found."})).as_deref(), Some("Profile not found."));
        assert_eq!(extract_message(&json!({"error": ["first", "second"]})).as_deref(), Some("first"));
        assert_eq!(extract_message(&json!({"success": false})), None);
    }

    #[test]
    fn message_or_falls_back_for_transport_errors() {
        let err = ApiError::Decode("bad".into());
        assert_eq!(err.message_or("Signup failed"), "Signup failed");
        let err = ApiError::Rejected("Mobile number already registered".into());
        assert_eq!(err.message_or("Signup failed"), "Mobile number already registered");
    }
}
