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

//! Semantic validation of server settings.
//!
//! Unknown and misspelled fields are already rejected during
//! deserialization; this module checks the values themselves and reports
//! every problem at once.

use super::types::ServiceApiConfig;

/// Accepted values for `logLevel`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation error for server settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors:\n{}", .0.join("\n"))]
    Multiple(Vec<String>),
}

/// Validate `config`, collecting all errors.
pub fn validate_settings(config: &ServiceApiConfig) -> Result<(), SettingsError> {
    let mut errors: Vec<(&str, String)> = Vec::new();

    if config.host.trim().is_empty() {
        errors.push(("host", "must not be empty".to_string()));
    }
    if config.port == 0 {
        errors.push(("port", "must be greater than 0".to_string()));
    }
    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        errors.push((
            "logLevel",
            format!(
                "'{}' is not one of {}",
                config.log_level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }
    if let Some(path) = &config.data_file {
        if path.as_os_str().is_empty() {
            errors.push(("dataFile", "must not be empty".to_string()));
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => {
            let (field, reason) = errors.remove(0);
            Err(SettingsError::InvalidValue {
                field: field.to_string(),
                reason,
            })
        }
        _ => Err(SettingsError::Multiple(
            errors
                .into_iter()
                .map(|(field, reason)| format!("Invalid value for '{field}': {reason}"))
                .collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_settings(&ServiceApiConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let config = ServiceApiConfig {
            port: 0,
            ..ServiceApiConfig::default()
        };
        let err = validate_settings(&config).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { ref field, .. } if field == "port"));
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let config = ServiceApiConfig {
            log_level: "DEBUG".to_string(),
            ..ServiceApiConfig::default()
        };
        assert!(validate_settings(&config).is_ok());
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let config = ServiceApiConfig {
            host: " ".to_string(),
            log_level: "verbose".to_string(),
            data_file: Some(PathBuf::new()),
            ..ServiceApiConfig::default()
        };
        match validate_settings(&config).unwrap_err() {
            SettingsError::Multiple(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.contains("logLevel")));
            }
            other => panic!("expected multiple errors, got {other}"),
        }
    }
}
