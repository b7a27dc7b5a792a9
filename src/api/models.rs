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

//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs accept missing fields so that validation can name the field
//! instead of surfacing a serde error.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    require_non_empty, AssetOwner, ImpactLabel, IndicatorDetails, NewAssetGroup, NewIndicator,
    ValidationError,
};

/// Indicator submission body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct IndicatorRequest {
    /// Name of the asset, e.g. `pytest.testing.com`
    pub asset_identifier: String,
    /// Kind of asset, e.g. `website`
    pub asset_type: String,
    pub zone: String,
    pub description: String,
    /// Tool that produced the indicator, e.g. `scanapi`
    pub event_source_name: String,
    /// One of `maximum`, `high`, `medium`, `low`, `unknown`
    pub likelihood_indicator: String,
    /// Free-form object; scanners send `coverage` and per-label counters
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

impl IndicatorRequest {
    pub fn validate(self) -> Result<NewIndicator, ValidationError> {
        Ok(NewIndicator {
            asset_identifier: require_non_empty("asset_identifier", &self.asset_identifier)?,
            asset_type: require_non_empty("asset_type", &self.asset_type)?,
            zone: require_non_empty("zone", &self.zone)?,
            description: self.description.trim().to_string(),
            event_source_name: require_non_empty("event_source_name", &self.event_source_name)?,
            likelihood_indicator: ImpactLabel::sanitize(&self.likelihood_indicator)?,
            details: IndicatorDetails::from_value(self.details)?,
        })
    }
}

/// Identifiers issued for an accepted indicator.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IndicatorCreatedResponse {
    pub asset_id: u64,
    pub indicator_id: u64,
}

/// Result of deleting an asset.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssetDeletedResponse {
    pub message: String,
    pub asset_id: u64,
    /// Number of indicators removed with the asset
    pub indicators_removed: usize,
}

/// Result of deleting an indicator, asset group or service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub message: String,
    pub id: u64,
}

/// Owner assignment body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct OwnerRequest {
    pub operator: String,
    pub team: String,
}

impl OwnerRequest {
    pub fn validate(self) -> Result<AssetOwner, ValidationError> {
        AssetOwner::new(&self.operator, &self.team)
    }
}

/// Asset group creation body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AssetGroupRequest {
    pub name: String,
    /// Assets to move into the group; each must exist
    pub asset_ids: Vec<u64>,
}

impl AssetGroupRequest {
    pub fn validate(self) -> Result<NewAssetGroup, ValidationError> {
        NewAssetGroup::new(&self.name, self.asset_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_indicator_request_validates() {
        let request: IndicatorRequest = serde_json::from_value(json!({
            "asset_identifier": " pytest.testing.com ",
            "asset_type": "website",
            "zone": "pytest",
            "event_source_name": "scanapi",
            "likelihood_indicator": "HIGH",
            "details": {"coverage": true, "high": 1}
        }))
        .unwrap();

        let indicator = request.validate().unwrap();
        assert_eq!(indicator.asset_identifier, "pytest.testing.com");
        assert_eq!(indicator.description, "");
        assert_eq!(indicator.likelihood_indicator, ImpactLabel::High);
        assert_eq!(
            serde_json::to_value(&indicator.details).unwrap(),
            json!({"coverage": true, "high": 1})
        );
    }

    #[test]
    fn test_indicator_request_missing_field() {
        let request: IndicatorRequest = serde_json::from_value(json!({
            "asset_identifier": "host",
            "asset_type": "hostname",
            "likelihood_indicator": "low"
        }))
        .unwrap();

        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::MissingField("zone")
        );
    }

    #[test]
    fn test_indicator_request_rejects_non_object_details() {
        let request = IndicatorRequest {
            asset_identifier: "host".to_string(),
            asset_type: "hostname".to_string(),
            zone: "dmz".to_string(),
            event_source_name: "nessus".to_string(),
            likelihood_indicator: "low".to_string(),
            details: json!([1, 2, 3]),
            ..IndicatorRequest::default()
        };
        assert!(matches!(
            request.validate(),
            Err(ValidationError::Invalid(_))
        ));
    }

    #[test]
    fn test_owner_request() {
        let owner = OwnerRequest {
            operator: "it".to_string(),
            team: "webops".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(owner.triage_key, "it-webops");

        assert!(OwnerRequest::default().validate().is_err());
    }
}
