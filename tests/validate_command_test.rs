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

//! Integration tests for the `serviceapi validate` command.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to run the validate command and capture output
fn run_validate(config_path: &Path, extra_args: &[&str]) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_serviceapi"))
        .arg("validate")
        .arg("--config")
        .arg(config_path)
        .args(extra_args)
        .output()
        .expect("Failed to execute validate command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    (output.status.success(), stdout)
}

#[test]
fn test_validate_valid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("serviceapi.yaml");
    fs::write(
        &config_path,
        "host: 0.0.0.0\nport: 8080\nlogLevel: info\npersistData: false\n",
    )
    .unwrap();

    let (success, stdout) = run_validate(&config_path, &[]);
    assert!(success, "{stdout}");
    assert!(stdout.contains("[OK] Configuration is valid"));
    assert!(stdout.contains("in-memory only"));
}

#[test]
fn test_validate_show_resolved_expands_env() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("serviceapi.yaml");
    fs::write(&config_path, "port: ${SERVICEAPI_VALIDATE_PORT}\n").unwrap();
    fs::write(temp_dir.path().join(".env"), "SERVICEAPI_VALIDATE_PORT=9443\n").unwrap();

    let (success, stdout) = run_validate(&config_path, &["--show-resolved"]);
    assert!(success, "{stdout}");
    assert!(stdout.contains("port: 9443"), "{stdout}");
}

#[test]
fn test_validate_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("serviceapi.yaml");
    fs::write(&config_path, "port: 0\nlogLevel: loud\n").unwrap();

    let (success, stdout) = run_validate(&config_path, &[]);
    assert!(!success);
    assert!(stdout.contains("[ERROR] Configuration is invalid"));
}

#[test]
fn test_validate_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let (success, stdout) = run_validate(&temp_dir.path().join("absent.yaml"), &[]);
    assert!(!success);
    assert!(stdout.contains("Configuration file not found"));
}
