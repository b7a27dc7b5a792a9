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

//! Tests for loading server configuration files.

#![allow(clippy::unwrap_used)]

use serviceapi::config::{load_config_file, ConfigError};
use serviceapi::ServiceApiServer;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_server_from_yaml_with_env_and_port_override() {
    std::env::set_var("SERVICEAPI_IT_LOG_LEVEL", "debug");
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("serviceapi.yaml");
    fs::write(
        &config_path,
        format!(
            concat!(
                "host: 127.0.0.1\n",
                "port: ${{SERVICEAPI_IT_PORT:-9000}}\n",
                "logLevel: ${{SERVICEAPI_IT_LOG_LEVEL}}\n",
                "dataFile: {}\n",
            ),
            temp_dir.path().join("data.yaml").display()
        ),
    )
    .unwrap();

    let config = load_config_file(&config_path).unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.log_level, "debug");

    let server = ServiceApiServer::new(config_path, Some(9100)).await.unwrap();
    assert!(!server.is_read_only());
}

#[test]
fn test_unknown_field_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("serviceapi.yaml");
    fs::write(&config_path, "host: 127.0.0.1\nlistenPort: 9000\n").unwrap();

    match load_config_file(&config_path) {
        Err(ConfigError::ParseError { yaml_err, .. }) => {
            assert!(yaml_err.contains("listenPort"), "{yaml_err}");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("serviceapi.json");
    fs::write(&config_path, r#"{"logLevel": "chatty"}"#).unwrap();

    let err = load_config_file(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
    assert!(err.to_string().contains("chatty"));
}
