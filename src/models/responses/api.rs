//! Generic API response models.

use serde::Serialize;
use utoipa::ToSchema;

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// A list response that also reports how many items it carries.
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data,
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// Response for deletions: `{ "success": true, "data": {} }`.
    pub fn empty() -> Self {
        Self::success(serde_json::json!({}))
    }
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status
    #[schema(example = "OK")]
    pub status: String,
    /// Status message
    #[schema(example = "Server is running")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_includes_count() {
        let response = ApiResponse::list(vec![1, 2, 3]);
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({ "success": true, "count": 3, "data": [1, 2, 3] })
        );
    }

    #[test]
    fn test_single_and_empty_omit_count() {
        assert_eq!(
            serde_json::to_value(ApiResponse::success("x")).unwrap(),
            json!({ "success": true, "data": "x" })
        );
        assert_eq!(
            serde_json::to_value(ApiResponse::empty()).unwrap(),
            json!({ "success": true, "data": {} })
        );
    }
}
