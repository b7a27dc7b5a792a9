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

//! Configuration management for the service API.
//!
//! - Type-safe settings ([`ServiceApiConfig`])
//! - Environment variable interpolation (`${VAR}`, `${VAR:-default}`)
//! - YAML and JSON file loading
//! - Value validation
//!
//! ```yaml
//! host: "${SERVICEAPI_HOST:-0.0.0.0}"
//! port: ${SERVICEAPI_PORT:-8080}
//! logLevel: info
//! dataFile: ./data/serviceapi.yaml
//! persistData: true
//! ```

pub mod env_interpolation;
pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{load_config_file, save_config_file, ConfigError};
pub use types::ServiceApiConfig;
pub use validation::SettingsError;
