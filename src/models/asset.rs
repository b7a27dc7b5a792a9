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

//! Assets and the indicators reported against them.
//!
//! An asset is never created directly. It appears the first time an
//! indicator names it and is matched on later submissions by the
//! `(asset_identifier, asset_type, zone)` triple.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{require_non_empty, ImpactLabel, ValidationError};

/// A tracked resource such as a website or a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Asset {
    /// Store-issued identifier
    pub id: u64,
    /// Name of the asset, e.g. a hostname
    pub asset_identifier: String,
    /// Kind of asset, e.g. `website` or `hostname`
    pub asset_type: String,
    /// Zone the asset lives in
    pub zone: String,
    /// Description taken from the most recent indicator
    pub description: String,
    /// Group the asset belongs to, if any
    pub asset_group_id: Option<u64>,
    /// Operator and team responsible for the asset
    pub owner: Option<AssetOwner>,
    /// Latest indicator per event source
    pub indicators: Vec<Indicator>,
    pub created_at: DateTime<Utc>,
    pub last_indicator: DateTime<Utc>,
}

impl Asset {
    /// True when `new` refers to this asset.
    pub fn matches(&self, new: &NewIndicator) -> bool {
        self.asset_identifier == new.asset_identifier
            && self.asset_type == new.asset_type
            && self.zone == new.zone
    }

    /// Copy of this asset keeping only indicators from `event_source_name`.
    pub fn with_indicators_from(&self, event_source_name: &str) -> Option<Asset> {
        let indicators: Vec<Indicator> = self
            .indicators
            .iter()
            .filter(|i| i.event_source_name == event_source_name)
            .cloned()
            .collect();
        if indicators.is_empty() {
            return None;
        }
        Some(Asset {
            indicators,
            ..self.clone()
        })
    }
}

/// Ownership information attached to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssetOwner {
    pub operator: String,
    pub team: String,
    /// `<operator>-<team>`, used to route triage work
    pub triage_key: String,
}

impl AssetOwner {
    pub fn new(operator: &str, team: &str) -> Result<Self, ValidationError> {
        let operator = require_non_empty("operator", operator)?;
        let team = require_non_empty("team", team)?;
        Ok(Self {
            triage_key: format!("{operator}-{team}"),
            operator,
            team,
        })
    }
}

/// An event describing a condition detected on an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Indicator {
    pub id: u64,
    pub asset_id: u64,
    pub event_source_name: String,
    pub likelihood_indicator: ImpactLabel,
    pub description: String,
    pub timestamp_utc: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub details: IndicatorDetails,
}

/// Free-form indicator details.
///
/// Vulnerability scanners report `coverage` plus one counter per impact
/// label (`maximum`, `high`, `medium`, `low`). Other keys are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorDetails(IndexMap<String, serde_json::Value>);

impl IndicatorDetails {
    /// Build details from an arbitrary JSON value, which must be an object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        match value {
            serde_json::Value::Null => Ok(Self::default()),
            serde_json::Value::Object(map) => Ok(Self(map.into_iter().collect())),
            other => Err(ValidationError::Invalid(format!(
                "details must be a JSON object, got {other}"
            ))),
        }
    }
}

/// A validated indicator submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIndicator {
    pub asset_identifier: String,
    pub asset_type: String,
    pub zone: String,
    pub description: String,
    pub event_source_name: String,
    pub likelihood_indicator: ImpactLabel,
    pub details: IndicatorDetails,
}
