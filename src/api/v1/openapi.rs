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

//! OpenAPI documentation for API v1.
//!
//! The document is served at `/api/v1/openapi.json` and the Swagger UI
//! is served at `/api/v1/docs/`.

use utoipa::OpenApi;

use crate::api::models::{
    AssetDeletedResponse, AssetGroupRequest, DeletedResponse, IndicatorCreatedResponse,
    IndicatorRequest, OwnerRequest,
};
use crate::api::shared::{
    ApiResponseSchema, ApiVersionsResponse, ErrorDetail, ErrorResponse, HealthResponse,
    StatusResponse,
};
use crate::models::{
    Asset, AssetGroup, AssetOwner, ImpactLabel, Indicator, RiskAttribute, RiskMeasure, Service,
    ServiceRisk,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_api_versions,
        super::handlers::health_check,
        super::handlers::status,
        super::handlers::asset_status,
        super::handlers::indicator_status,
        super::handlers::asset_group_status,
        super::handlers::service_status,
        super::handlers::create_indicator,
        super::handlers::get_indicator,
        super::handlers::delete_indicator,
        super::handlers::get_indicators_by_event_source,
        super::handlers::get_asset,
        super::handlers::delete_asset,
        super::handlers::set_asset_owner,
        super::handlers::find_assets,
        super::handlers::create_asset_group,
        super::handlers::get_asset_group,
        super::handlers::list_asset_groups,
        super::handlers::delete_asset_group,
        super::handlers::import_service,
        super::handlers::get_service,
        super::handlers::list_services,
        super::handlers::delete_service,
    ),
    components(
        schemas(
            HealthResponse,
            ApiResponseSchema,
            StatusResponse,
            ApiVersionsResponse,
            ErrorResponse,
            ErrorDetail,
            IndicatorRequest,
            IndicatorCreatedResponse,
            AssetDeletedResponse,
            DeletedResponse,
            OwnerRequest,
            AssetGroupRequest,
            Asset,
            AssetOwner,
            Indicator,
            ImpactLabel,
            AssetGroup,
            Service,
            ServiceRisk,
            RiskAttribute,
            RiskMeasure,
        )
    ),
    tags(
        (name = "API", description = "API version information"),
        (name = "Health", description = "Health and liveness endpoints"),
        (name = "Indicators", description = "Indicator submission and lookup"),
        (name = "Assets", description = "Assets created from indicators"),
        (name = "Asset Groups", description = "Named groups of assets"),
        (name = "Services", description = "Services imported from risk assessments"),
    ),
    info(
        title = "Service API",
        version = "1.0.0",
        description = "Service API REST API v1.\n\nTracks security indicators reported against assets, groups assets, and records services imported from Rapid Risk Assessments.\n\n## Lookups\n\nLookups by id return a JSON list holding zero or one element. An unknown id yields an empty list rather than a 404.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    )
)]
pub struct ApiDocV1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_resource_paths() {
        let doc = ApiDocV1::openapi();
        for path in [
            "/status",
            "/api/v1/indicator",
            "/api/v1/indicators/{event_source_name}",
            "/api/v1/asset/{id}",
            "/api/v1/asset_groups",
            "/api/v1/service",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
