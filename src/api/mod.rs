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

//! REST API implementation for the service API.
//!
//! The API uses URL-based versioning with resource endpoints prefixed with
//! `/api/v1/`.
//!
//! ## API Structure
//!
//! ```text
//! /status                  - Liveness (unversioned)
//! /health                  - Health check (unversioned)
//! /api/versions            - List available API versions
//! /api/v1/indicator[s]     - Indicator submission and lookup
//! /api/v1/asset[s]         - Asset lookup, deletion and ownership
//! /api/v1/asset_group[s]   - Asset group management
//! /api/v1/service[s]       - Service (RRA) import and lookup
//! ```
//!
//! ## Module Organization
//!
//! - `shared` - Common types and handlers shared across API versions
//! - `v1` - API version 1 implementation
//! - `version` - Version constants and utilities
//! - `models` - Data Transfer Objects (DTOs) for API requests/responses

pub mod models;
pub mod shared;
pub mod v1;
pub mod version;

// Re-export commonly used types from shared module
pub use shared::error::*;
pub use shared::responses::*;

pub use v1::openapi::ApiDocV1;
pub use v1::routes::build_v1_router;

pub use version::{ApiVersion, API_CURRENT_VERSION};
