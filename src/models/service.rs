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

//! Services and their risk ratings, as imported from RRA documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ImpactLabel;

/// Impact and probability for one risk dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskMeasure {
    pub impact: ImpactLabel,
    pub probability: ImpactLabel,
}

/// Reputation, finances and productivity ratings for one security attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskAttribute {
    pub reputation: RiskMeasure,
    pub finances: RiskMeasure,
    pub productivity: RiskMeasure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceRisk {
    pub confidentiality: RiskAttribute,
    pub integrity: RiskAttribute,
    pub availability: RiskAttribute,
}

impl ServiceRisk {
    /// Highest impact across every dimension.
    pub fn highest_impact(&self) -> ImpactLabel {
        let ranked = [
            ImpactLabel::Maximum,
            ImpactLabel::High,
            ImpactLabel::Medium,
            ImpactLabel::Low,
        ];
        let impacts: Vec<ImpactLabel> = [self.confidentiality, self.integrity, self.availability]
            .iter()
            .flat_map(|a| [a.reputation.impact, a.finances.impact, a.productivity.impact])
            .collect();
        ranked
            .into_iter()
            .find(|label| impacts.contains(label))
            .unwrap_or(ImpactLabel::Unknown)
    }
}

/// A stored service record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Service {
    pub id: u64,
    /// Sanitized service name
    pub service: String,
    /// Normalized default data classification
    pub data_default: String,
    pub risk: ServiceRisk,
    /// Modification time reported by the RRA document
    pub last_modified: DateTime<Utc>,
    /// When this record was last written
    pub last_updated: DateTime<Utc>,
    /// The RRA document as received
    #[schema(value_type = Object)]
    pub raw: serde_json::Value,
}

/// A validated service import, not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub service: String,
    pub data_default: String,
    pub risk: ServiceRisk,
    pub last_modified: DateTime<Utc>,
    pub raw: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure(impact: ImpactLabel) -> RiskMeasure {
        RiskMeasure {
            impact,
            probability: ImpactLabel::Unknown,
        }
    }

    fn attribute(impact: ImpactLabel) -> RiskAttribute {
        RiskAttribute {
            reputation: measure(impact),
            finances: measure(ImpactLabel::Low),
            productivity: measure(ImpactLabel::Unknown),
        }
    }

    #[test]
    fn test_highest_impact() {
        let risk = ServiceRisk {
            confidentiality: attribute(ImpactLabel::Medium),
            integrity: attribute(ImpactLabel::High),
            availability: attribute(ImpactLabel::Low),
        };
        assert_eq!(risk.highest_impact(), ImpactLabel::High);
    }

    #[test]
    fn test_highest_impact_all_unknown() {
        let unknown = RiskAttribute {
            reputation: measure(ImpactLabel::Unknown),
            finances: measure(ImpactLabel::Unknown),
            productivity: measure(ImpactLabel::Unknown),
        };
        let risk = ServiceRisk {
            confidentiality: unknown,
            integrity: unknown,
            availability: unknown,
        };
        assert_eq!(risk.highest_impact(), ImpactLabel::Unknown);
    }
}
