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

//! Domain models tracked by the service API.
//!
//! - `asset` - Assets and the indicators reported against them
//! - `asset_group` - Named groups of assets
//! - `service` - Services imported from risk assessment documents
//! - `label` - Normalized impact/likelihood labels

pub mod asset;
pub mod asset_group;
pub mod label;
pub mod service;

pub use asset::{Asset, AssetOwner, Indicator, IndicatorDetails, NewIndicator};
pub use asset_group::{AssetGroup, NewAssetGroup};
pub use label::ImpactLabel;
pub use service::{NewService, RiskAttribute, RiskMeasure, Service, ServiceRisk};

/// Errors raised while validating incoming documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid impact label '{0}'")]
    InvalidImpactLabel(String),

    #[error("{0}")]
    Invalid(String),
}

/// Returns the trimmed value, or an error naming `field` when it is blank.
pub(crate) fn require_non_empty(
    field: &'static str,
    value: &str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
