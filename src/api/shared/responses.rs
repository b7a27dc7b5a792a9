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

//! Common response types shared across API versions.

use serde::Serialize;
use utoipa::ToSchema;

/// Liveness payload returned by every status endpoint.
pub const STATUS_MESSAGE: &str = "Qapla'!";

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status of the server
    pub status: String,
    /// Current server timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Generic API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data if successful
    pub data: Option<T>,
    /// Error message if unsuccessful
    pub error: Option<String>,
}

/// Generic API Response schema for OpenAPI documentation
#[derive(Serialize, ToSchema)]
#[schema(as = ApiResponse)]
pub struct ApiResponseSchema {
    /// Whether the request was successful
    pub success: bool,
    /// Response data if successful
    pub data: Option<serde_json::Value>,
    /// Error message if unsuccessful
    pub error: Option<String>,
}

/// Simple status message response
#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    /// Status message
    pub message: String,
}

impl StatusResponse {
    pub fn alive() -> Self {
        Self {
            message: STATUS_MESSAGE.to_string(),
        }
    }
}

/// Response listing available API versions
#[derive(Serialize, ToSchema)]
pub struct ApiVersionsResponse {
    /// List of available API versions
    pub versions: Vec<String>,
    /// The current/latest API version
    pub current: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_shape() {
        let json = serde_json::to_value(ApiResponse::success(StatusResponse::alive())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "data": {"message": "Qapla'!"}, "error": null})
        );
    }
}
