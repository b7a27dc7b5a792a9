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

//! API v1 handler functions with OpenAPI documentation.
//!
//! These handlers wrap the shared handler implementations with v1-specific
//! path annotations for OpenAPI documentation. The actual business logic
//! is implemented in the shared handlers module.

use axum::{
    extract::{Extension, Path},
    response::Json,
};
use bytes::Bytes;
use std::sync::Arc;

use crate::api::models::{
    AssetDeletedResponse, AssetGroupRequest, DeletedResponse, IndicatorCreatedResponse,
    IndicatorRequest, OwnerRequest,
};
use crate::api::shared::{
    ApiResponse, ApiVersionsResponse, ErrorResponse, HealthResponse, StatusResponse,
};
use crate::models::{Asset, AssetGroup, Indicator, Service};
use crate::persistence::DataPersistence;
use crate::store::SharedStore;

use crate::api::shared::handlers as shared;

type Persistence = Option<Arc<DataPersistence>>;

/// List available API versions
#[utoipa::path(
    get,
    path = "/api/versions",
    responses(
        (status = 200, description = "List of available API versions", body = ApiVersionsResponse),
    ),
    tag = "API"
)]
pub async fn list_api_versions() -> Json<ApiVersionsResponse> {
    shared::list_api_versions().await
}

/// Check server health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    shared::health_check().await
}

/// Service liveness
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Service is alive", body = StatusResponse),
    ),
    tag = "Health"
)]
pub async fn status() -> Json<StatusResponse> {
    shared::status().await
}

/// Asset namespace liveness
#[utoipa::path(
    get,
    path = "/api/v1/asset/status",
    responses((status = 200, description = "Namespace is alive", body = StatusResponse)),
    tag = "Assets"
)]
pub async fn asset_status() -> Json<StatusResponse> {
    shared::status().await
}

/// Indicator namespace liveness
#[utoipa::path(
    get,
    path = "/api/v1/indicator/status",
    responses((status = 200, description = "Namespace is alive", body = StatusResponse)),
    tag = "Indicators"
)]
pub async fn indicator_status() -> Json<StatusResponse> {
    shared::status().await
}

/// Asset group namespace liveness
#[utoipa::path(
    get,
    path = "/api/v1/asset_group/status",
    responses((status = 200, description = "Namespace is alive", body = StatusResponse)),
    tag = "Asset Groups"
)]
pub async fn asset_group_status() -> Json<StatusResponse> {
    shared::status().await
}

/// Service namespace liveness
#[utoipa::path(
    get,
    path = "/api/v1/service/status",
    responses((status = 200, description = "Namespace is alive", body = StatusResponse)),
    tag = "Services"
)]
pub async fn service_status() -> Json<StatusResponse> {
    shared::status().await
}

/// Submit an indicator
///
/// Creates the asset named by `(asset_identifier, asset_type, zone)` if it
/// does not exist yet. The body is parsed as JSON whatever the content type.
#[utoipa::path(
    post,
    path = "/api/v1/indicator",
    request_body = IndicatorRequest,
    responses(
        (status = 200, description = "Indicator recorded", body = IndicatorCreatedResponse),
        (status = 400, description = "Invalid indicator", body = ErrorResponse),
        (status = 409, description = "Server is read-only", body = ErrorResponse),
    ),
    tag = "Indicators"
)]
pub async fn create_indicator(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Persistence>,
    body: Bytes,
) -> Result<Json<IndicatorCreatedResponse>, ErrorResponse> {
    shared::create_indicator(
        Extension(store),
        Extension(read_only),
        Extension(data_persistence),
        body,
    )
    .await
}

/// Get an indicator
#[utoipa::path(
    get,
    path = "/api/v1/indicator/{id}",
    params(("id" = String, Path, description = "Indicator ID")),
    responses(
        (status = 200, description = "Zero or one indicator", body = [Indicator]),
    ),
    tag = "Indicators"
)]
pub async fn get_indicator(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Indicator>>, ErrorResponse> {
    shared::get_indicator(Extension(store), Path(id)).await
}

/// Delete an indicator
#[utoipa::path(
    delete,
    path = "/api/v1/indicator/{id}",
    params(("id" = String, Path, description = "Indicator ID")),
    responses(
        (status = 200, description = "Indicator deleted", body = ApiResponse),
        (status = 404, description = "Indicator not found", body = ErrorResponse),
    ),
    tag = "Indicators"
)]
pub async fn delete_indicator(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Persistence>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ErrorResponse> {
    shared::delete_indicator(
        Extension(store),
        Extension(read_only),
        Extension(data_persistence),
        Path(id),
    )
    .await
}

/// Assets with indicators from an event source
///
/// Each asset only carries the indicators reported by that source.
#[utoipa::path(
    get,
    path = "/api/v1/indicators/{event_source_name}",
    params(("event_source_name" = String, Path, description = "Event source, e.g. scanapi")),
    responses(
        (status = 200, description = "Matching assets, possibly empty", body = [Asset]),
    ),
    tag = "Indicators"
)]
pub async fn get_indicators_by_event_source(
    Extension(store): Extension<SharedStore>,
    Path(event_source_name): Path<String>,
) -> Result<Json<Vec<Asset>>, ErrorResponse> {
    shared::get_indicators_by_event_source(Extension(store), Path(event_source_name)).await
}

/// Get an asset
#[utoipa::path(
    get,
    path = "/api/v1/asset/{id}",
    params(("id" = String, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Zero or one asset", body = [Asset]),
    ),
    tag = "Assets"
)]
pub async fn get_asset(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Asset>>, ErrorResponse> {
    shared::get_asset(Extension(store), Path(id)).await
}

/// Delete an asset
#[utoipa::path(
    delete,
    path = "/api/v1/asset/{id}",
    params(("id" = String, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset deleted", body = ApiResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 409, description = "Server is read-only", body = ErrorResponse),
    ),
    tag = "Assets"
)]
pub async fn delete_asset(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Persistence>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AssetDeletedResponse>>, ErrorResponse> {
    shared::delete_asset(
        Extension(store),
        Extension(read_only),
        Extension(data_persistence),
        Path(id),
    )
    .await
}

/// Assign an asset owner
#[utoipa::path(
    put,
    path = "/api/v1/asset/{id}/owner",
    params(("id" = String, Path, description = "Asset ID")),
    request_body = OwnerRequest,
    responses(
        (status = 200, description = "Updated asset", body = Asset),
        (status = 400, description = "Invalid owner", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
    ),
    tag = "Assets"
)]
pub async fn set_asset_owner(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Persistence>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Asset>, ErrorResponse> {
    shared::set_asset_owner(
        Extension(store),
        Extension(read_only),
        Extension(data_persistence),
        Path(id),
        body,
    )
    .await
}

/// Find assets by identifier
#[utoipa::path(
    get,
    path = "/api/v1/assets/{asset_identifier}",
    params(("asset_identifier" = String, Path, description = "Asset identifier, e.g. a hostname")),
    responses(
        (status = 200, description = "Matching assets, possibly empty", body = [Asset]),
    ),
    tag = "Assets"
)]
pub async fn find_assets(
    Extension(store): Extension<SharedStore>,
    Path(asset_identifier): Path<String>,
) -> Result<Json<Vec<Asset>>, ErrorResponse> {
    shared::find_assets(Extension(store), Path(asset_identifier)).await
}

/// Create an asset group
#[utoipa::path(
    post,
    path = "/api/v1/asset_group",
    request_body = AssetGroupRequest,
    responses(
        (status = 200, description = "Asset group created", body = AssetGroup),
        (status = 400, description = "Invalid asset group", body = ErrorResponse),
        (status = 404, description = "Listed asset not found", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse),
    ),
    tag = "Asset Groups"
)]
pub async fn create_asset_group(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Persistence>,
    body: Bytes,
) -> Result<Json<AssetGroup>, ErrorResponse> {
    shared::create_asset_group(
        Extension(store),
        Extension(read_only),
        Extension(data_persistence),
        body,
    )
    .await
}

/// Get an asset group
#[utoipa::path(
    get,
    path = "/api/v1/asset_group/{id}",
    params(("id" = String, Path, description = "Asset group ID")),
    responses(
        (status = 200, description = "Zero or one asset group", body = [AssetGroup]),
    ),
    tag = "Asset Groups"
)]
pub async fn get_asset_group(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AssetGroup>>, ErrorResponse> {
    shared::get_asset_group(Extension(store), Path(id)).await
}

/// List asset groups
#[utoipa::path(
    get,
    path = "/api/v1/asset_groups",
    responses(
        (status = 200, description = "All asset groups", body = [AssetGroup]),
    ),
    tag = "Asset Groups"
)]
pub async fn list_asset_groups(
    Extension(store): Extension<SharedStore>,
) -> Result<Json<Vec<AssetGroup>>, ErrorResponse> {
    shared::list_asset_groups(Extension(store)).await
}

/// Delete an asset group
#[utoipa::path(
    delete,
    path = "/api/v1/asset_group/{id}",
    params(("id" = String, Path, description = "Asset group ID")),
    responses(
        (status = 200, description = "Asset group deleted", body = ApiResponse),
        (status = 404, description = "Asset group not found", body = ErrorResponse),
    ),
    tag = "Asset Groups"
)]
pub async fn delete_asset_group(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Persistence>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ErrorResponse> {
    shared::delete_asset_group(
        Extension(store),
        Extension(read_only),
        Extension(data_persistence),
        Path(id),
    )
    .await
}

/// Import a service from an RRA
#[utoipa::path(
    post,
    path = "/api/v1/service",
    request_body(content = Object, description = "RRA document"),
    responses(
        (status = 200, description = "Stored service", body = Service),
        (status = 400, description = "Invalid RRA", body = ErrorResponse),
    ),
    tag = "Services"
)]
pub async fn import_service(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Persistence>,
    body: Bytes,
) -> Result<Json<Service>, ErrorResponse> {
    shared::import_service(
        Extension(store),
        Extension(read_only),
        Extension(data_persistence),
        body,
    )
    .await
}

/// Get a service
#[utoipa::path(
    get,
    path = "/api/v1/service/{id}",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Zero or one service", body = [Service]),
    ),
    tag = "Services"
)]
pub async fn get_service(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Service>>, ErrorResponse> {
    shared::get_service(Extension(store), Path(id)).await
}

/// List services
#[utoipa::path(
    get,
    path = "/api/v1/services",
    responses(
        (status = 200, description = "All services", body = [Service]),
    ),
    tag = "Services"
)]
pub async fn list_services(
    Extension(store): Extension<SharedStore>,
) -> Result<Json<Vec<Service>>, ErrorResponse> {
    shared::list_services(Extension(store)).await
}

/// Delete a service
#[utoipa::path(
    delete,
    path = "/api/v1/service/{id}",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service deleted", body = ApiResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
    ),
    tag = "Services"
)]
pub async fn delete_service(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Persistence>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ErrorResponse> {
    shared::delete_service(
        Extension(store),
        Extension(read_only),
        Extension(data_persistence),
        Path(id),
    )
    .await
}
