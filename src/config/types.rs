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
use std::path::PathBuf;

use super::validation::{validate_settings, SettingsError};

/// Top-level server configuration.
///
/// Field names are camelCase in YAML/JSON; unknown fields are rejected so
/// that typos do not silently fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// YAML file holding the store snapshot; no file means in-memory only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// Save the store to `data_file` after every mutation
    #[serde(default = "default_persist_data")]
    pub persist_data: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_persist_data() -> bool {
    true
}

impl Default for ServiceApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            data_file: None,
            persist_data: default_persist_data(),
        }
    }
}

impl ServiceApiConfig {
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_settings(self)
    }

    /// Data file used for persistence, if persistence is active.
    pub fn persistence_path(&self) -> Option<&PathBuf> {
        if self.persist_data {
            self.data_file.as_ref()
        } else {
            None
        }
    }
}
