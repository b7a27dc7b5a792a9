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

//! Integration tests for data persistence.
//! Tests that API mutations are saved to the data file and survive a restart.

#![allow(clippy::unwrap_used)]

mod test_support;

use axum::http::StatusCode;
use serde_json::json;
use serviceapi::{DataPersistence, ServiceApiConfig, ServiceApiServer};
use std::fs;
use tempfile::TempDir;
use test_support::{delete, get, indicator, post, rra, scanapi_indicator, submit};

fn config_with_data_file(dir: &TempDir, persist_data: bool) -> ServiceApiConfig {
    ServiceApiConfig {
        host: "127.0.0.1".to_string(),
        data_file: Some(dir.path().join("data").join("serviceapi.yaml")),
        persist_data,
        ..ServiceApiConfig::default()
    }
}

#[tokio::test]
async fn test_mutations_survive_restart() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = config_with_data_file(&temp_dir, true);
    let data_file = config.data_file.clone().unwrap();

    let server = ServiceApiServer::from_config(config.clone()).unwrap();
    let router = server.router();
    let asset_id = submit(&router, scanapi_indicator()).await;
    let (status, _) = post(
        &router,
        "/api/v1/asset_group",
        json!({"name": "pytest", "asset_ids": [asset_id]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post(
        &router,
        "/api/v1/service",
        rra("Payments", "restricted", "2017-05-09T14:24:12Z"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert!(data_file.exists());
    let content = fs::read_to_string(&data_file).unwrap();
    assert!(content.contains("pytest.testing.com"));
    assert!(content.contains("confidential restricted"));

    // A new server over the same data file sees everything
    let restarted = ServiceApiServer::from_config(config).unwrap();
    let router = restarted.router();
    let (_, assets) = get(&router, &format!("/api/v1/asset/{asset_id}")).await;
    assert_eq!(assets[0]["id"].as_u64(), Some(asset_id));
    assert!(assets[0]["asset_group_id"].is_u64());
    let (_, services) = get(&router, "/api/v1/services").await;
    assert_eq!(services[0]["service"], "Payments");

    // Ids are not reused after a restart
    let (_, _) = delete(&router, &format!("/api/v1/asset/{asset_id}")).await;
    let next = submit(&router, scanapi_indicator()).await;
    assert!(next > asset_id);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_submissions_all_reach_data_file() {
    const SUBMISSIONS: usize = 40;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = config_with_data_file(&temp_dir, true);
    let data_file = config.data_file.clone().unwrap();

    let server = ServiceApiServer::from_config(config).unwrap();
    let router = server.router();

    let handles: Vec<_> = (0..SUBMISSIONS)
        .map(|i| {
            let router = router.clone();
            tokio::spawn(async move {
                submit(
                    &router,
                    indicator(&format!("host-{i}.example.com"), "nessus", "low"),
                )
                .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let snapshot = DataPersistence::load_snapshot(&data_file).unwrap();
    assert_eq!(snapshot.assets.len(), SUBMISSIONS);
    assert!(!data_file.with_extension("tmp").exists());
}

#[tokio::test]
async fn test_persistence_disabled_by_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = config_with_data_file(&temp_dir, false);
    let data_file = config.data_file.clone().unwrap();

    let server = ServiceApiServer::from_config(config).unwrap();
    submit(&server.router(), scanapi_indicator()).await;

    assert!(!data_file.exists());
}

#[tokio::test]
async fn test_existing_data_file_is_loaded_without_persisting() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = config_with_data_file(&temp_dir, true);
    let data_file = config.data_file.clone().unwrap();

    let seeded = ServiceApiServer::from_config(config.clone()).unwrap();
    let asset_id = submit(&seeded.router(), scanapi_indicator()).await;
    let saved = fs::read_to_string(&data_file).unwrap();

    let read_only_copy = ServiceApiConfig {
        persist_data: false,
        ..config
    };
    let server = ServiceApiServer::from_config(read_only_copy).unwrap();
    let router = server.router();
    let (_, assets) = get(&router, &format!("/api/v1/asset/{asset_id}")).await;
    assert_eq!(assets.as_array().unwrap().len(), 1);

    delete(&router, &format!("/api/v1/asset/{asset_id}")).await;
    assert_eq!(fs::read_to_string(&data_file).unwrap(), saved);
}

#[test]
fn test_corrupt_data_file_fails_startup() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = config_with_data_file(&temp_dir, true);
    let data_file = config.data_file.clone().unwrap();
    fs::create_dir_all(data_file.parent().unwrap()).unwrap();
    fs::write(&data_file, "assets: 42").unwrap();

    assert!(DataPersistence::load_snapshot(&data_file).is_err());
    assert!(ServiceApiServer::from_config(config).is_err());
}
