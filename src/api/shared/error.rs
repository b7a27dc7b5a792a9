// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types and error handling utilities shared across API versions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ValidationError;
use crate::store::StoreError;

/// Error codes for API responses
pub mod error_codes {
    pub const ASSET_NOT_FOUND: &str = "ASSET_NOT_FOUND";
    pub const INDICATOR_NOT_FOUND: &str = "INDICATOR_NOT_FOUND";
    pub const ASSET_GROUP_NOT_FOUND: &str = "ASSET_GROUP_NOT_FOUND";
    pub const SERVICE_NOT_FOUND: &str = "SERVICE_NOT_FOUND";

    pub const READ_ONLY_MODE: &str = "READ_ONLY_MODE";
    pub const DUPLICATE_RESOURCE: &str = "DUPLICATE_RESOURCE";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// API error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetail>,
}

/// Additional error details
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Resource type if applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Resource ID if applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Technical error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error response
    pub fn with_details(mut self, details: ErrorDetail) -> Self {
        self.details = Some(details);
        self
    }

    /// Not-found error for a resource addressed by a raw path segment.
    pub fn not_found(resource_type: &str, id: &str) -> Self {
        let code = match resource_type {
            "asset" => error_codes::ASSET_NOT_FOUND,
            "indicator" => error_codes::INDICATOR_NOT_FOUND,
            "asset group" => error_codes::ASSET_GROUP_NOT_FOUND,
            "service" => error_codes::SERVICE_NOT_FOUND,
            _ => error_codes::INTERNAL_ERROR,
        };
        let message = format!("{} '{id}' not found", capitalize(resource_type));
        Self::new(code, message).with_details(ErrorDetail {
            resource_type: Some(resource_type.to_string()),
            resource_id: Some(id.to_string()),
            technical_details: None,
        })
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_REQUEST, message)
    }

    pub fn read_only() -> Self {
        Self::new(
            error_codes::READ_ONLY_MODE,
            "Server is in read-only mode. Data changes are not allowed.",
        )
    }

    /// Convert to a specific status code
    pub fn with_status(self) -> (StatusCode, axum::Json<Self>) {
        let status = status_from_code(&self.code);
        (status, axum::Json(self))
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        self.with_status().into_response()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert an error code to an HTTP status code
fn status_from_code(code: &str) -> StatusCode {
    match code {
        error_codes::ASSET_NOT_FOUND
        | error_codes::INDICATOR_NOT_FOUND
        | error_codes::ASSET_GROUP_NOT_FOUND
        | error_codes::SERVICE_NOT_FOUND => StatusCode::NOT_FOUND,

        error_codes::READ_ONLY_MODE | error_codes::DUPLICATE_RESOURCE => StatusCode::CONFLICT,

        error_codes::INVALID_REQUEST => StatusCode::BAD_REQUEST,

        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert StoreError to ErrorResponse
impl From<StoreError> for ErrorResponse {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AssetNotFound(id) => ErrorResponse::not_found("asset", &id.to_string()),
            StoreError::IndicatorNotFound(id) => {
                ErrorResponse::not_found("indicator", &id.to_string())
            }
            StoreError::AssetGroupNotFound(id) => {
                ErrorResponse::not_found("asset group", &id.to_string())
            }
            StoreError::ServiceNotFound(id) => ErrorResponse::not_found("service", &id.to_string()),
            StoreError::Duplicate(what) => ErrorResponse::new(
                error_codes::DUPLICATE_RESOURCE,
                format!("{what} already exists"),
            ),
            StoreError::Validation(e) => e.into(),
            StoreError::Internal(message) => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal store error")
                    .with_details(ErrorDetail {
                        resource_type: None,
                        resource_id: None,
                        technical_details: Some(message),
                    })
            }
        }
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        ErrorResponse::invalid_request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::new("TEST_CODE", "Test message");
        let json = serde_json::to_string(&response).expect("Failed to serialize");

        assert!(json.contains("\"code\":\"TEST_CODE\""));
        assert!(json.contains("\"message\":\"Test message\""));
        // details should be omitted when None
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_not_found_carries_details() {
        let response = ErrorResponse::not_found("asset group", "7");
        assert_eq!(response.code, error_codes::ASSET_GROUP_NOT_FOUND);
        assert_eq!(response.message, "Asset group '7' not found");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["details"]["resource_id"], "7");
        assert!(json["details"].get("technical_details").is_none());
    }

    #[test]
    fn test_status_from_code() {
        assert_eq!(
            status_from_code(error_codes::ASSET_NOT_FOUND),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_from_code(error_codes::SERVICE_NOT_FOUND),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_from_code(error_codes::READ_ONLY_MODE),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_from_code(error_codes::DUPLICATE_RESOURCE),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_from_code(error_codes::INVALID_REQUEST),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_from_code("SOMETHING_ELSE"),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_store_error() {
        let response: ErrorResponse = StoreError::AssetNotFound(3).into();
        assert_eq!(response.code, error_codes::ASSET_NOT_FOUND);

        let response: ErrorResponse =
            StoreError::Duplicate("Asset group 'web'".to_string()).into();
        assert_eq!(response.code, error_codes::DUPLICATE_RESOURCE);
        assert_eq!(response.message, "Asset group 'web' already exists");

        let response: ErrorResponse =
            StoreError::Validation(ValidationError::MissingField("zone")).into();
        assert_eq!(response.code, error_codes::INVALID_REQUEST);

        let response: ErrorResponse = StoreError::Internal("lock poisoned".to_string()).into();
        let (status, _) = response.with_status();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
