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

//! API Version 1 (v1) implementation.
//!
//! All v1 endpoints are accessible under the `/api/v1/` prefix.
//!
//! ## Endpoint Structure
//!
//! - `GET /api/v1/{asset,indicator,asset_group,service}/status` - Liveness
//! - `POST /api/v1/indicator` - Submit an indicator
//! - `GET|DELETE /api/v1/indicator/{id}` - Get or delete an indicator
//! - `GET /api/v1/indicators/{event_source_name}` - Assets by event source
//! - `GET|DELETE /api/v1/asset/{id}` - Get or delete an asset
//! - `PUT /api/v1/asset/{id}/owner` - Assign an owner
//! - `GET /api/v1/assets/{asset_identifier}` - Assets by identifier
//! - `POST /api/v1/asset_group`, `GET /api/v1/asset_groups` - Asset groups
//! - `GET|DELETE /api/v1/asset_group/{id}` - Get or delete an asset group
//! - `POST /api/v1/service`, `GET /api/v1/services` - Services
//! - `GET|DELETE /api/v1/service/{id}` - Get or delete a service

pub mod handlers;
pub mod openapi;
pub mod routes;

pub use handlers::*;
pub use openapi::ApiDocV1;
pub use routes::build_v1_router;
