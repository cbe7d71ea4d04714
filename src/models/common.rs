use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response envelope: `success` plus exactly one of `data`, `message`
/// or `error`. The absent fields are dropped from the JSON.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_carries_only_data() {
        let body = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(body, json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn message_carries_only_message() {
        let body = serde_json::to_value(ApiResponse::message("Account deleted")).unwrap();
        assert_eq!(body, json!({"success": true, "message": "Account deleted"}));
    }

    #[test]
    fn error_nests_code_and_message() {
        let body =
            serde_json::to_value(ApiResponse::error("NOT_FOUND", "Account 9 not found")).unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": {"code": "NOT_FOUND", "message": "Account 9 not found"}
            })
        );
    }
}
