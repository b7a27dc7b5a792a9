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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{require_non_empty, ValidationError};

/// A named set of assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssetGroup {
    pub id: u64,
    pub name: String,
    pub asset_ids: Vec<u64>,
    pub created_at: DateTime<Utc>,
}

/// A validated asset group creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssetGroup {
    pub name: String,
    pub asset_ids: Vec<u64>,
}

impl NewAssetGroup {
    /// Validate the name and drop duplicate asset ids, keeping first-seen order.
    pub fn new(name: &str, asset_ids: Vec<u64>) -> Result<Self, ValidationError> {
        let name = require_non_empty("name", name)?;
        let mut unique = Vec::with_capacity(asset_ids.len());
        for id in asset_ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Ok(Self {
            name,
            asset_ids: unique,
        })
    }
}
