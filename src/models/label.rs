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

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::ValidationError;

/// Normalized severity label used for indicator likelihoods and RRA
/// impact/probability ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLabel {
    Maximum,
    High,
    Medium,
    Low,
    Unknown,
}

impl ImpactLabel {
    /// Trim and lower-case `input`, then match it against the known labels.
    pub fn sanitize(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_lowercase().as_str() {
            "maximum" => Ok(ImpactLabel::Maximum),
            "high" => Ok(ImpactLabel::High),
            "medium" => Ok(ImpactLabel::Medium),
            "low" => Ok(ImpactLabel::Low),
            "unknown" => Ok(ImpactLabel::Unknown),
            _ => Err(ValidationError::InvalidImpactLabel(input.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLabel::Maximum => "maximum",
            ImpactLabel::High => "high",
            ImpactLabel::Medium => "medium",
            ImpactLabel::Low => "low",
            ImpactLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ImpactLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ImpactLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::sanitize(s)
    }
}
