//! The uniform success envelope shared by every endpoint.

use serde::Serialize;

/// Uniform success envelope.
///
/// All success responses follow this shape:
/// ```json
/// {
///   "success": true,
///   "data": ...,
///   "count": 3,
///   "message": "beacon created"
/// }
/// ```
/// `count` and `message` are omitted when not meaningful for the
/// endpoint. Failures use [`crate::error::ErrorResponse`] instead.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always `true` for success bodies.
    pub success: bool,
    /// Endpoint-specific payload.
    pub data: T,
    /// Number of records in `data`, for list and bulk endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Optional human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload with no count or message.
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
            message: None,
        }
    }

    /// Wraps a payload with a human-readable message.
    #[must_use]
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            count: None,
            message: Some(message.into()),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Wraps a list payload, filling `count` from its length.
    #[must_use]
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            success: true,
            data,
            count: Some(count),
            message: None,
        }
    }

    /// Wraps a list payload with both `count` and a message.
    #[must_use]
    pub fn list_with_message(data: Vec<T>, message: impl Into<String>) -> Self {
        let count = data.len();
        Self {
            success: true,
            data,
            count: Some(count),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_carries_count() {
        let body = ApiResponse::list(vec![1, 2, 3]);
        let Ok(json) = serde_json::to_value(&body) else {
            panic!("serializable");
        };
        assert_eq!(json.get("success"), Some(&serde_json::json!(true)));
        assert_eq!(json.get("count"), Some(&serde_json::json!(3)));
        assert!(json.get("message").is_none());
    }

    #[test]
    fn plain_envelope_omits_count_and_message() {
        let body = ApiResponse::new(serde_json::json!({"a": 1}));
        let Ok(json) = serde_json::to_value(&body) else {
            panic!("serializable");
        };
        assert!(json.get("count").is_none());
        assert!(json.get("message").is_none());
    }
}
