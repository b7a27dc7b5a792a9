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

//! Rapid Risk Assessment (RRA) document import.
//!
//! Only the fields needed to describe a service are parsed; everything else
//! in the document is kept verbatim in [`NewService::raw`]. Parsing is
//! lenient (missing fields deserialize as empty strings) so that validation
//! can report which part of the document is missing.

use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;

use crate::models::{
    ImpactLabel, NewService, RiskAttribute, RiskMeasure, ServiceRisk, ValidationError,
};

#[derive(Debug, Deserialize)]
struct RraDocument {
    #[serde(default)]
    details: RraDetails,
    #[serde(rename = "lastmodified")]
    last_modified: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
struct RraDetails {
    #[serde(default)]
    metadata: RraMetadata,
    #[serde(default)]
    risk: RraRisk,
    #[serde(default)]
    data: RraData,
}

#[derive(Debug, Default, Deserialize)]
struct RraMetadata {
    #[serde(default)]
    service: String,
}

#[derive(Debug, Default, Deserialize)]
struct RraData {
    #[serde(default)]
    default: String,
}

#[derive(Debug, Default, Deserialize)]
struct RraRisk {
    #[serde(default)]
    confidentiality: RraRiskAttribute,
    #[serde(default)]
    integrity: RraRiskAttribute,
    #[serde(default)]
    availability: RraRiskAttribute,
}

#[derive(Debug, Default, Deserialize)]
struct RraRiskAttribute {
    #[serde(default)]
    reputation: RraMeasure,
    #[serde(default)]
    finances: RraMeasure,
    #[serde(default)]
    productivity: RraMeasure,
}

#[derive(Debug, Default, Deserialize)]
struct RraMeasure {
    #[serde(default)]
    impact: String,
    #[serde(default)]
    probability: String,
}

/// Parse, validate and sanitize an RRA document.
pub fn parse_rra(raw: serde_json::Value) -> Result<NewService, ValidationError> {
    let document: RraDocument = serde_json::from_value(raw.clone())
        .map_err(|e| ValidationError::Invalid(format!("Malformed RRA document: {e}")))?;

    let service = sanitize_service_name(&document.details.metadata.service)?;
    let risk = document.details.risk.sanitize(&service)?;
    let data_default = sanitize_data_classification(&document.details.data.default)?;

    Ok(NewService {
        service,
        data_default,
        risk,
        last_modified: document.last_modified,
        raw,
    })
}

fn sanitize_service_name(name: &str) -> Result<String, ValidationError> {
    let name = name.replace('\n', " ");
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Invalid("RRA has no service name".to_string()));
    }
    Ok(name.to_string())
}

/// Lower-case the classification and map legacy values onto their
/// current `confidential ...` names.
fn sanitize_data_classification(value: &str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Invalid(
            "RRA has no default data classification".to_string(),
        ));
    }
    let lowered = value.to_lowercase();
    let normalized = match lowered.as_str() {
        "internal" => "confidential internal".to_string(),
        "restricted" => "confidential restricted".to_string(),
        "secret" => "confidential secret".to_string(),
        _ => lowered,
    };
    Ok(normalized)
}

impl RraRisk {
    fn sanitize(&self, service: &str) -> Result<ServiceRisk, ValidationError> {
        Ok(ServiceRisk {
            confidentiality: self.confidentiality.sanitize(service)?,
            integrity: self.integrity.sanitize(service)?,
            availability: self.availability.sanitize(service)?,
        })
    }
}

impl RraRiskAttribute {
    fn sanitize(&self, service: &str) -> Result<RiskAttribute, ValidationError> {
        Ok(RiskAttribute {
            reputation: self.reputation.sanitize(service)?,
            finances: self.finances.sanitize(service)?,
            productivity: self.productivity.sanitize(service)?,
        })
    }
}

impl RraMeasure {
    fn sanitize(&self, service: &str) -> Result<RiskMeasure, ValidationError> {
        let impact = ImpactLabel::sanitize(&self.impact)?;
        // A missing probability still leaves the impact usable.
        let probability = if self.probability.is_empty() {
            warn!("RRA import: defaulting probability to unknown for \"{service}\"");
            ImpactLabel::Unknown
        } else {
            ImpactLabel::sanitize(&self.probability)?
        };
        Ok(RiskMeasure {
            impact,
            probability,
        })
    }
}
