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

//! Storage for assets, indicators, asset groups and services.
//!
//! Handlers only see the [`Store`] trait. [`InMemoryStore`] is the one
//! implementation; its state can be exported as a [`StoreSnapshot`] and
//! written to disk by [`crate::persistence::DataPersistence`].

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::models::{
    Asset, AssetGroup, AssetOwner, Indicator, NewAssetGroup, NewIndicator, NewService, Service,
    ValidationError,
};

/// Errors that can occur in the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Asset '{0}' not found")]
    AssetNotFound(u64),

    #[error("Indicator '{0}' not found")]
    IndicatorNotFound(u64),

    #[error("Asset group '{0}' not found")]
    AssetGroupNotFound(u64),

    #[error("Service '{0}' not found")]
    ServiceNotFound(u64),

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store handle shared between handlers.
pub type SharedStore = Arc<dyn Store>;

/// Identifiers issued for an indicator submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorReceipt {
    pub asset_id: u64,
    pub indicator_id: u64,
    /// True when the submission created the asset
    pub asset_created: bool,
}

/// Outcome of a service import.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceImport {
    pub service: Service,
    /// False when an existing `(service, last_modified)` record was updated
    pub created: bool,
}

/// Trait for storing and retrieving service API records.
#[async_trait]
pub trait Store: Send + Sync {
    /// Record an indicator, creating the asset it names if needed.
    ///
    /// An earlier indicator from the same event source on the same asset is
    /// replaced and its id reused.
    async fn submit_indicator(&self, indicator: NewIndicator) -> StoreResult<IndicatorReceipt>;

    async fn get_indicator(&self, id: u64) -> StoreResult<Option<Indicator>>;

    async fn delete_indicator(&self, id: u64) -> StoreResult<Indicator>;

    /// Assets with at least one indicator from `event_source_name`, each
    /// carrying only those indicators.
    async fn indicators_from_event_source(&self, event_source_name: &str)
        -> StoreResult<Vec<Asset>>;

    async fn get_asset(&self, id: u64) -> StoreResult<Option<Asset>>;

    /// All assets named `asset_identifier`, regardless of type or zone.
    async fn find_assets_by_identifier(&self, asset_identifier: &str) -> StoreResult<Vec<Asset>>;

    /// Remove an asset together with its indicators and group membership.
    async fn delete_asset(&self, id: u64) -> StoreResult<Asset>;

    async fn set_asset_owner(&self, id: u64, owner: AssetOwner) -> StoreResult<Asset>;

    /// Create a group and move the listed assets into it.
    async fn create_asset_group(&self, group: NewAssetGroup) -> StoreResult<AssetGroup>;

    async fn get_asset_group(&self, id: u64) -> StoreResult<Option<AssetGroup>>;

    async fn list_asset_groups(&self) -> StoreResult<Vec<AssetGroup>>;

    /// Remove a group; its assets become ungrouped.
    async fn delete_asset_group(&self, id: u64) -> StoreResult<AssetGroup>;

    /// Insert or update a service keyed on `(service, last_modified)`.
    async fn import_service(&self, service: NewService) -> StoreResult<ServiceImport>;

    async fn get_service(&self, id: u64) -> StoreResult<Option<Service>>;

    async fn list_services(&self) -> StoreResult<Vec<Service>>;

    async fn delete_service(&self, id: u64) -> StoreResult<Service>;

    /// Export the full store state.
    async fn snapshot(&self) -> StoreResult<StoreSnapshot>;
}

/// Serializable copy of the whole store, including id counters so that
/// ids are never reused after a reload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub next_asset_id: u64,
    #[serde(default)]
    pub next_indicator_id: u64,
    #[serde(default)]
    pub next_asset_group_id: u64,
    #[serde(default)]
    pub next_service_id: u64,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub asset_groups: Vec<AssetGroup>,
    #[serde(default)]
    pub services: Vec<Service>,
}
