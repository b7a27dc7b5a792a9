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

//! API v1 route definitions.
//!
//! All routes are designed to be nested under `/api/v1/`.

use axum::{
    extract::Extension,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use super::handlers;
use crate::persistence::DataPersistence;
use crate::store::SharedStore;

/// Build the complete v1 API router.
pub fn build_v1_router(
    store: SharedStore,
    read_only: Arc<bool>,
    data_persistence: Option<Arc<DataPersistence>>,
) -> Router {
    Router::new()
        .merge(build_indicator_router())
        .merge(build_asset_router())
        .merge(build_asset_group_router())
        .merge(build_service_router())
        .layer(Extension(store))
        .layer(Extension(read_only))
        .layer(Extension(data_persistence))
}

fn build_indicator_router() -> Router {
    Router::new()
        .route("/indicator/status", get(handlers::indicator_status))
        .route("/indicator", post(handlers::create_indicator))
        .route(
            "/indicator/:id",
            get(handlers::get_indicator).delete(handlers::delete_indicator),
        )
        .route(
            "/indicators/:event_source_name",
            get(handlers::get_indicators_by_event_source),
        )
}

fn build_asset_router() -> Router {
    Router::new()
        .route("/asset/status", get(handlers::asset_status))
        .route(
            "/asset/:id",
            get(handlers::get_asset).delete(handlers::delete_asset),
        )
        .route("/asset/:id/owner", put(handlers::set_asset_owner))
        .route("/assets/:asset_identifier", get(handlers::find_assets))
}

fn build_asset_group_router() -> Router {
    Router::new()
        .route("/asset_group/status", get(handlers::asset_group_status))
        .route("/asset_group", post(handlers::create_asset_group))
        .route(
            "/asset_group/:id",
            get(handlers::get_asset_group).delete(handlers::delete_asset_group),
        )
        .route("/asset_groups", get(handlers::list_asset_groups))
}

fn build_service_router() -> Router {
    Router::new()
        .route("/service/status", get(handlers::service_status))
        .route("/service", post(handlers::import_service))
        .route(
            "/service/:id",
            get(handlers::get_service).delete(handlers::delete_service),
        )
        .route("/services", get(handlers::list_services))
}
