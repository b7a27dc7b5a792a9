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

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use log::debug;
use tokio::sync::RwLock;

use super::{IndicatorReceipt, ServiceImport, Store, StoreError, StoreResult, StoreSnapshot};
use crate::models::{
    Asset, AssetGroup, AssetOwner, Indicator, NewAssetGroup, NewIndicator, NewService, Service,
};

/// Thread-safe in-memory store.
///
/// All state sits behind one lock so each operation is atomic with respect
/// to every other.
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

struct StoreState {
    next_asset_id: u64,
    next_indicator_id: u64,
    next_asset_group_id: u64,
    next_service_id: u64,
    assets: IndexMap<u64, Asset>,
    asset_groups: IndexMap<u64, AssetGroup>,
    services: IndexMap<u64, Service>,
}

impl StoreState {
    fn issue_asset_id(&mut self) -> StoreResult<u64> {
        issue(&mut self.next_asset_id, "asset")
    }

    fn issue_indicator_id(&mut self) -> StoreResult<u64> {
        issue(&mut self.next_indicator_id, "indicator")
    }

    fn issue_asset_group_id(&mut self) -> StoreResult<u64> {
        issue(&mut self.next_asset_group_id, "asset group")
    }

    fn issue_service_id(&mut self) -> StoreResult<u64> {
        issue(&mut self.next_service_id, "service")
    }

    fn leave_group(&mut self, asset_id: u64, group_id: u64) {
        if let Some(group) = self.asset_groups.get_mut(&group_id) {
            group.asset_ids.retain(|id| *id != asset_id);
        }
    }
}

fn issue(counter: &mut u64, kind: &str) -> StoreResult<u64> {
    let id = *counter;
    *counter = id
        .checked_add(1)
        .ok_or_else(|| StoreError::Internal(format!("{kind} ids exhausted")))?;
    Ok(id)
}

/// Next id to issue: past both the recorded counter and every id in use.
fn next_id<'a>(
    recorded: u64,
    ids: impl Iterator<Item = &'a u64>,
    kind: &str,
) -> StoreResult<u64> {
    let past_max = match ids.max() {
        Some(max) => max.checked_add(1).ok_or_else(|| {
            StoreError::Internal(format!("{kind} id {max} leaves no room for new ids"))
        })?,
        None => 1,
    };
    Ok(recorded.max(past_max).max(1))
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                next_asset_id: 1,
                next_indicator_id: 1,
                next_asset_group_id: 1,
                next_service_id: 1,
                assets: IndexMap::new(),
                asset_groups: IndexMap::new(),
                services: IndexMap::new(),
            }),
        }
    }

    /// Rebuild a store from a previously exported snapshot.
    ///
    /// Fails if an id in the snapshot leaves no room to issue new ones.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> StoreResult<Self> {
        let indicator_ids: Vec<u64> = snapshot
            .assets
            .iter()
            .flat_map(|a| a.indicators.iter().map(|i| i.id))
            .collect();

        let state = StoreState {
            next_asset_id: next_id(
                snapshot.next_asset_id,
                snapshot.assets.iter().map(|a| &a.id),
                "asset",
            )?,
            next_indicator_id: next_id(
                snapshot.next_indicator_id,
                indicator_ids.iter(),
                "indicator",
            )?,
            next_asset_group_id: next_id(
                snapshot.next_asset_group_id,
                snapshot.asset_groups.iter().map(|g| &g.id),
                "asset group",
            )?,
            next_service_id: next_id(
                snapshot.next_service_id,
                snapshot.services.iter().map(|s| &s.id),
                "service",
            )?,
            assets: snapshot.assets.into_iter().map(|a| (a.id, a)).collect(),
            asset_groups: snapshot
                .asset_groups
                .into_iter()
                .map(|g| (g.id, g))
                .collect(),
            services: snapshot.services.into_iter().map(|s| (s.id, s)).collect(),
        };

        Ok(Self {
            state: RwLock::new(state),
        })
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn submit_indicator(&self, new: NewIndicator) -> StoreResult<IndicatorReceipt> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let now = Utc::now();

        let existing = state.assets.values().find(|a| a.matches(&new)).map(|a| a.id);
        let replaced = existing
            .and_then(|id| state.assets.get(&id))
            .and_then(|a| {
                a.indicators
                    .iter()
                    .find(|i| i.event_source_name == new.event_source_name)
            })
            .map(|i| i.id);
        let indicator_id = match replaced {
            Some(id) => id,
            None => state.issue_indicator_id()?,
        };

        let (asset_id, asset_created) = match existing {
            Some(id) => (id, false),
            None => {
                let id = state.issue_asset_id()?;
                state.assets.insert(
                    id,
                    Asset {
                        id,
                        asset_identifier: new.asset_identifier.clone(),
                        asset_type: new.asset_type.clone(),
                        zone: new.zone.clone(),
                        description: new.description.clone(),
                        asset_group_id: None,
                        owner: None,
                        indicators: Vec::new(),
                        created_at: now,
                        last_indicator: now,
                    },
                );
                debug!("Created asset {id} for '{}'", new.asset_identifier);
                (id, true)
            }
        };

        let asset = state
            .assets
            .get_mut(&asset_id)
            .ok_or_else(|| StoreError::Internal(format!("asset {asset_id} vanished")))?;
        if !new.description.is_empty() {
            asset.description = new.description.clone();
        }
        asset.last_indicator = now;
        asset.indicators.retain(|i| i.id != indicator_id);
        asset.indicators.push(Indicator {
            id: indicator_id,
            asset_id,
            event_source_name: new.event_source_name,
            likelihood_indicator: new.likelihood_indicator,
            description: new.description,
            timestamp_utc: now,
            details: new.details,
        });

        Ok(IndicatorReceipt {
            asset_id,
            indicator_id,
            asset_created,
        })
    }

    async fn get_indicator(&self, id: u64) -> StoreResult<Option<Indicator>> {
        let state = self.state.read().await;
        Ok(state
            .assets
            .values()
            .flat_map(|a| a.indicators.iter())
            .find(|i| i.id == id)
            .cloned())
    }

    async fn delete_indicator(&self, id: u64) -> StoreResult<Indicator> {
        let mut state = self.state.write().await;
        for asset in state.assets.values_mut() {
            if let Some(pos) = asset.indicators.iter().position(|i| i.id == id) {
                return Ok(asset.indicators.remove(pos));
            }
        }
        Err(StoreError::IndicatorNotFound(id))
    }

    async fn indicators_from_event_source(
        &self,
        event_source_name: &str,
    ) -> StoreResult<Vec<Asset>> {
        let state = self.state.read().await;
        Ok(state
            .assets
            .values()
            .filter_map(|a| a.with_indicators_from(event_source_name))
            .collect())
    }

    async fn get_asset(&self, id: u64) -> StoreResult<Option<Asset>> {
        let state = self.state.read().await;
        Ok(state.assets.get(&id).cloned())
    }

    async fn find_assets_by_identifier(&self, asset_identifier: &str) -> StoreResult<Vec<Asset>> {
        let state = self.state.read().await;
        Ok(state
            .assets
            .values()
            .filter(|a| a.asset_identifier == asset_identifier)
            .cloned()
            .collect())
    }

    async fn delete_asset(&self, id: u64) -> StoreResult<Asset> {
        let mut state = self.state.write().await;
        let asset = state
            .assets
            .shift_remove(&id)
            .ok_or(StoreError::AssetNotFound(id))?;
        if let Some(group_id) = asset.asset_group_id {
            state.leave_group(id, group_id);
        }
        Ok(asset)
    }

    async fn set_asset_owner(&self, id: u64, owner: AssetOwner) -> StoreResult<Asset> {
        let mut state = self.state.write().await;
        let asset = state
            .assets
            .get_mut(&id)
            .ok_or(StoreError::AssetNotFound(id))?;
        asset.owner = Some(owner);
        Ok(asset.clone())
    }

    async fn create_asset_group(&self, new: NewAssetGroup) -> StoreResult<AssetGroup> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        if state.asset_groups.values().any(|g| g.name == new.name) {
            return Err(StoreError::Duplicate(format!("Asset group '{}'", new.name)));
        }
        if let Some(missing) = new
            .asset_ids
            .iter()
            .find(|id| !state.assets.contains_key(*id))
        {
            return Err(StoreError::AssetNotFound(*missing));
        }

        let id = state.issue_asset_group_id()?;
        for asset_id in &new.asset_ids {
            let previous = state
                .assets
                .get(asset_id)
                .and_then(|a| a.asset_group_id);
            if let Some(previous) = previous {
                state.leave_group(*asset_id, previous);
            }
            if let Some(asset) = state.assets.get_mut(asset_id) {
                asset.asset_group_id = Some(id);
            }
        }

        let group = AssetGroup {
            id,
            name: new.name,
            asset_ids: new.asset_ids,
            created_at: Utc::now(),
        };
        state.asset_groups.insert(id, group.clone());
        Ok(group)
    }

    async fn get_asset_group(&self, id: u64) -> StoreResult<Option<AssetGroup>> {
        let state = self.state.read().await;
        Ok(state.asset_groups.get(&id).cloned())
    }

    async fn list_asset_groups(&self) -> StoreResult<Vec<AssetGroup>> {
        let state = self.state.read().await;
        Ok(state.asset_groups.values().cloned().collect())
    }

    async fn delete_asset_group(&self, id: u64) -> StoreResult<AssetGroup> {
        let mut state = self.state.write().await;
        let group = state
            .asset_groups
            .shift_remove(&id)
            .ok_or(StoreError::AssetGroupNotFound(id))?;
        for asset in state.assets.values_mut() {
            if asset.asset_group_id == Some(id) {
                asset.asset_group_id = None;
            }
        }
        Ok(group)
    }

    async fn import_service(&self, new: NewService) -> StoreResult<ServiceImport> {
        let mut state = self.state.write().await;
        let now = Utc::now();

        if let Some(existing) = state
            .services
            .values_mut()
            .find(|s| s.service == new.service && s.last_modified == new.last_modified)
        {
            existing.data_default = new.data_default;
            existing.risk = new.risk;
            existing.raw = new.raw;
            existing.last_updated = now;
            return Ok(ServiceImport {
                service: existing.clone(),
                created: false,
            });
        }

        let id = state.issue_service_id()?;
        let service = Service {
            id,
            service: new.service,
            data_default: new.data_default,
            risk: new.risk,
            last_modified: new.last_modified,
            last_updated: now,
            raw: new.raw,
        };
        state.services.insert(id, service.clone());
        Ok(ServiceImport {
            service,
            created: true,
        })
    }

    async fn get_service(&self, id: u64) -> StoreResult<Option<Service>> {
        let state = self.state.read().await;
        Ok(state.services.get(&id).cloned())
    }

    async fn list_services(&self) -> StoreResult<Vec<Service>> {
        let state = self.state.read().await;
        Ok(state.services.values().cloned().collect())
    }

    async fn delete_service(&self, id: u64) -> StoreResult<Service> {
        let mut state = self.state.write().await;
        state
            .services
            .shift_remove(&id)
            .ok_or(StoreError::ServiceNotFound(id))
    }

    async fn snapshot(&self) -> StoreResult<StoreSnapshot> {
        let state = self.state.read().await;
        Ok(StoreSnapshot {
            next_asset_id: state.next_asset_id,
            next_indicator_id: state.next_indicator_id,
            next_asset_group_id: state.next_asset_group_id,
            next_service_id: state.next_service_id,
            assets: state.assets.values().cloned().collect(),
            asset_groups: state.asset_groups.values().cloned().collect(),
            services: state.services.values().cloned().collect(),
        })
    }
}
