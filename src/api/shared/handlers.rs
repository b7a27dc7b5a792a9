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

//! Shared handler implementations used across API versions.
//!
//! These handler functions contain the core business logic that can be
//! reused by version-specific handlers. Each API version may wrap these
//! with version-specific path annotations.
//!
//! Lookups by id answer with a JSON list holding zero or one element.
//! Request bodies are read as raw bytes and parsed as JSON whatever the
//! `Content-Type` header says.

use axum::{
    extract::{Extension, Path},
    response::Json,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::error::ErrorResponse;
use super::responses::{ApiResponse, ApiVersionsResponse, HealthResponse, StatusResponse};
use crate::api::models::{
    AssetDeletedResponse, AssetGroupRequest, DeletedResponse, IndicatorCreatedResponse,
    IndicatorRequest, OwnerRequest,
};
use crate::api::version::ApiVersion;
use crate::models::{Asset, AssetGroup, Indicator, Service};
use crate::persistence::DataPersistence;
use crate::rra;
use crate::store::SharedStore;

/// Helper function to persist data after a successful operation.
/// Logs errors but does not fail the request - persistence failures are non-fatal.
pub async fn persist_after_operation(
    data_persistence: &Option<Arc<DataPersistence>>,
    operation: &str,
) {
    if let Some(persistence) = data_persistence {
        if let Err(e) = persistence.save().await {
            log::error!("Failed to persist data after {operation}: {e}");
        }
    }
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ErrorResponse> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ErrorResponse::invalid_request("Request body is empty"));
    }
    serde_json::from_slice(body)
        .map_err(|e| ErrorResponse::invalid_request(format!("Invalid JSON body: {e}")))
}

fn ensure_writable(read_only: &bool) -> Result<(), ErrorResponse> {
    if *read_only {
        return Err(ErrorResponse::read_only());
    }
    Ok(())
}

/// List available API versions
pub async fn list_api_versions() -> Json<ApiVersionsResponse> {
    Json(ApiVersionsResponse {
        versions: ApiVersion::all_strings(),
        current: crate::api::version::API_CURRENT_VERSION.to_string(),
    })
}

/// Check server health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Liveness probe shared by every namespace
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse::alive())
}

// ==========================================================================
// Indicators
// ==========================================================================

/// Record an indicator and link it to its asset
pub async fn create_indicator(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Option<Arc<DataPersistence>>>,
    body: Bytes,
) -> Result<Json<IndicatorCreatedResponse>, ErrorResponse> {
    ensure_writable(&read_only)?;

    let request: IndicatorRequest = parse_body(&body)?;
    let indicator = request.validate().map_err(|e| {
        log::warn!("Rejected indicator: {e}");
        ErrorResponse::from(e)
    })?;
    let event_source_name = indicator.event_source_name.clone();

    let receipt = store.submit_indicator(indicator).await?;
    if receipt.asset_created {
        log::info!(
            "Created asset {} from '{event_source_name}' indicator {}",
            receipt.asset_id,
            receipt.indicator_id
        );
    } else {
        log::debug!(
            "Recorded '{event_source_name}' indicator {} on asset {}",
            receipt.indicator_id,
            receipt.asset_id
        );
    }

    persist_after_operation(&data_persistence, "recording indicator").await;

    Ok(Json(IndicatorCreatedResponse {
        asset_id: receipt.asset_id,
        indicator_id: receipt.indicator_id,
    }))
}

/// Get an indicator by id
pub async fn get_indicator(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Indicator>>, ErrorResponse> {
    let Some(id) = parse_id(&id) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(store.get_indicator(id).await?.into_iter().collect()))
}

/// Delete an indicator by id
pub async fn delete_indicator(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Option<Arc<DataPersistence>>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ErrorResponse> {
    ensure_writable(&read_only)?;
    let indicator_id = parse_id(&id).ok_or_else(|| ErrorResponse::not_found("indicator", &id))?;

    let indicator = store.delete_indicator(indicator_id).await?;
    log::info!(
        "Indicator {indicator_id} removed from asset {}",
        indicator.asset_id
    );

    persist_after_operation(&data_persistence, "deleting indicator").await;

    Ok(Json(ApiResponse::success(DeletedResponse {
        message: format!("Indicator '{indicator_id}' deleted successfully"),
        id: indicator_id,
    })))
}

/// Assets carrying indicators from one event source
pub async fn get_indicators_by_event_source(
    Extension(store): Extension<SharedStore>,
    Path(event_source_name): Path<String>,
) -> Result<Json<Vec<Asset>>, ErrorResponse> {
    Ok(Json(
        store
            .indicators_from_event_source(&event_source_name)
            .await?,
    ))
}

// ==========================================================================
// Assets
// ==========================================================================

/// Get an asset by id
pub async fn get_asset(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Asset>>, ErrorResponse> {
    let Some(id) = parse_id(&id) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(store.get_asset(id).await?.into_iter().collect()))
}

/// Find assets by asset identifier
pub async fn find_assets(
    Extension(store): Extension<SharedStore>,
    Path(asset_identifier): Path<String>,
) -> Result<Json<Vec<Asset>>, ErrorResponse> {
    Ok(Json(
        store.find_assets_by_identifier(&asset_identifier).await?,
    ))
}

/// Delete an asset and its indicators
pub async fn delete_asset(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Option<Arc<DataPersistence>>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AssetDeletedResponse>>, ErrorResponse> {
    ensure_writable(&read_only)?;
    let asset_id = parse_id(&id).ok_or_else(|| ErrorResponse::not_found("asset", &id))?;

    let asset = store.delete_asset(asset_id).await?;
    let indicators_removed = asset.indicators.len();
    log::info!(
        "Asset {asset_id} ('{}') deleted with {indicators_removed} indicators",
        asset.asset_identifier
    );

    persist_after_operation(&data_persistence, "deleting asset").await;

    Ok(Json(ApiResponse::success(AssetDeletedResponse {
        message: format!("Asset '{asset_id}' deleted successfully"),
        asset_id,
        indicators_removed,
    })))
}

/// Assign an owner to an asset
pub async fn set_asset_owner(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Option<Arc<DataPersistence>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Asset>, ErrorResponse> {
    ensure_writable(&read_only)?;
    let asset_id = parse_id(&id).ok_or_else(|| ErrorResponse::not_found("asset", &id))?;

    let request: OwnerRequest = parse_body(&body)?;
    let owner = request.validate()?;
    let triage_key = owner.triage_key.clone();

    let asset = store.set_asset_owner(asset_id, owner).await?;
    log::info!("Asset {asset_id} assigned to '{triage_key}'");

    persist_after_operation(&data_persistence, "setting asset owner").await;

    Ok(Json(asset))
}

// ==========================================================================
// Asset groups
// ==========================================================================

/// Create an asset group
pub async fn create_asset_group(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Option<Arc<DataPersistence>>>,
    body: Bytes,
) -> Result<Json<AssetGroup>, ErrorResponse> {
    ensure_writable(&read_only)?;

    let request: AssetGroupRequest = parse_body(&body)?;
    let group = store.create_asset_group(request.validate()?).await?;
    log::info!(
        "Asset group '{}' created with {} assets",
        group.name,
        group.asset_ids.len()
    );

    persist_after_operation(&data_persistence, "creating asset group").await;

    Ok(Json(group))
}

/// Get an asset group by id
pub async fn get_asset_group(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AssetGroup>>, ErrorResponse> {
    let Some(id) = parse_id(&id) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(store.get_asset_group(id).await?.into_iter().collect()))
}

/// List all asset groups
pub async fn list_asset_groups(
    Extension(store): Extension<SharedStore>,
) -> Result<Json<Vec<AssetGroup>>, ErrorResponse> {
    Ok(Json(store.list_asset_groups().await?))
}

/// Delete an asset group
pub async fn delete_asset_group(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Option<Arc<DataPersistence>>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ErrorResponse> {
    ensure_writable(&read_only)?;
    let group_id = parse_id(&id).ok_or_else(|| ErrorResponse::not_found("asset group", &id))?;

    let group = store.delete_asset_group(group_id).await?;
    log::info!("Asset group '{}' deleted", group.name);

    persist_after_operation(&data_persistence, "deleting asset group").await;

    Ok(Json(ApiResponse::success(DeletedResponse {
        message: format!("Asset group '{}' deleted successfully", group.name),
        id: group_id,
    })))
}

// ==========================================================================
// Services
// ==========================================================================

/// Import a service from an RRA document
pub async fn import_service(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Option<Arc<DataPersistence>>>,
    body: Bytes,
) -> Result<Json<Service>, ErrorResponse> {
    ensure_writable(&read_only)?;

    let document: serde_json::Value = parse_body(&body)?;
    let service = rra::parse_rra(document).map_err(|e| {
        log::warn!("Rejected RRA: {e}");
        ErrorResponse::from(e)
    })?;

    let import = store.import_service(service).await?;
    let service = import.service;
    log::info!(
        "{} service '{}' (id {}, highest impact {})",
        if import.created { "Imported" } else { "Updated" },
        service.service,
        service.id,
        service.risk.highest_impact()
    );

    persist_after_operation(&data_persistence, "importing service").await;

    Ok(Json(service))
}

/// Get a service by id
pub async fn get_service(
    Extension(store): Extension<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Service>>, ErrorResponse> {
    let Some(id) = parse_id(&id) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(store.get_service(id).await?.into_iter().collect()))
}

/// List all services
pub async fn list_services(
    Extension(store): Extension<SharedStore>,
) -> Result<Json<Vec<Service>>, ErrorResponse> {
    Ok(Json(store.list_services().await?))
}

/// Delete a service
pub async fn delete_service(
    Extension(store): Extension<SharedStore>,
    Extension(read_only): Extension<Arc<bool>>,
    Extension(data_persistence): Extension<Option<Arc<DataPersistence>>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ErrorResponse> {
    ensure_writable(&read_only)?;
    let service_id = parse_id(&id).ok_or_else(|| ErrorResponse::not_found("service", &id))?;

    let service = store.delete_service(service_id).await?;
    log::info!("Service '{}' deleted", service.service);

    persist_after_operation(&data_persistence, "deleting service").await;

    Ok(Json(ApiResponse::success(DeletedResponse {
        message: format!("Service '{}' deleted successfully", service.service),
        id: service_id,
    })))
}
