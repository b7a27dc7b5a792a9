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

use crate::store::{SharedStore, StoreSnapshot};
use anyhow::Result;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Writes store snapshots to a YAML data file.
/// Uses atomic writes (temp file + rename) to prevent corruption.
pub struct DataPersistence {
    data_file_path: PathBuf,
    store: SharedStore,
    /// Held from snapshot through rename so saves land in mutation order.
    save_lock: Mutex<()>,
}

impl DataPersistence {
    pub fn new(data_file_path: PathBuf, store: SharedStore) -> Self {
        Self {
            data_file_path,
            store,
            save_lock: Mutex::new(()),
        }
    }

    /// Read a snapshot from `path`. A missing file yields an empty snapshot.
    pub fn load_snapshot(path: &Path) -> Result<StoreSnapshot> {
        if !path.exists() {
            debug!(
                "Data file {} does not exist, starting empty",
                path.display()
            );
            return Ok(StoreSnapshot::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read data file {}: {e}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(StoreSnapshot::default());
        }

        let snapshot: StoreSnapshot = serde_yaml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse data file {}: {e}", path.display()))?;
        info!(
            "Loaded {} assets, {} asset groups and {} services from {}",
            snapshot.assets.len(),
            snapshot.asset_groups.len(),
            snapshot.services.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Save the current store contents using atomic writes.
    pub async fn save(&self) -> Result<()> {
        let _guard = self.save_lock.lock().await;

        let snapshot = self
            .store
            .snapshot()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to snapshot store: {e}"))?;

        debug!("Saving data to {}", self.data_file_path.display());

        if let Some(parent) = self.data_file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.data_file_path.with_extension("tmp");
        let yaml_content = serde_yaml::to_string(&snapshot)?;

        tokio::fs::write(&temp_path, yaml_content)
            .await
            .map_err(|e| {
                error!(
                    "Failed to write temp data file {}: {e}",
                    temp_path.display()
                );
                anyhow::anyhow!("Failed to write temp data file: {e}")
            })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &self.data_file_path).await {
            error!(
                "Failed to rename temp data file {} to {}: {e}",
                temp_path.display(),
                self.data_file_path.display()
            );
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(anyhow::anyhow!("Failed to rename data file: {e}"));
        }

        debug!("Data saved to {}", self.data_file_path.display());
        Ok(())
    }

    /// A file that does not exist yet counts as writable.
    pub fn check_write_access(path: &Path) -> bool {
        use std::fs::OpenOptions;
        if !path.exists() {
            return true;
        }
        OpenOptions::new().append(true).open(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ImpactLabel, IndicatorDetails, NewAssetGroup, NewIndicator};
    use crate::store::{InMemoryStore, Store};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn indicator(identifier: &str) -> NewIndicator {
        NewIndicator {
            asset_identifier: identifier.to_string(),
            asset_type: "website".to_string(),
            zone: "public".to_string(),
            description: "scan".to_string(),
            event_source_name: "scanner".to_string(),
            likelihood_indicator: ImpactLabel::Medium,
            details: IndicatorDetails::default(),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let snapshot = DataPersistence::load_snapshot(&dir.path().join("missing.yaml")).unwrap();
        assert_eq!(snapshot, StoreSnapshot::default());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.yaml");
        std::fs::write(&path, "assets: [not, an, asset]").unwrap();
        assert!(DataPersistence::load_snapshot(&path).is_err());
    }

    #[tokio::test]
    async fn test_save_and_reload_keeps_counters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.yaml");

        let store = Arc::new(InMemoryStore::new());
        let first = store.submit_indicator(indicator("a.example.com")).await.unwrap();
        let second = store.submit_indicator(indicator("b.example.com")).await.unwrap();
        store
            .create_asset_group(NewAssetGroup::new("web", vec![first.asset_id]).unwrap())
            .await
            .unwrap();
        store.delete_asset(second.asset_id).await.unwrap();

        let persistence = DataPersistence::new(path.clone(), store.clone());
        persistence.save().await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let snapshot = DataPersistence::load_snapshot(&path).unwrap();
        assert_eq!(snapshot, store.snapshot().await.unwrap());

        let reloaded = InMemoryStore::from_snapshot(snapshot).unwrap();
        let third = reloaded
            .submit_indicator(indicator("c.example.com"))
            .await
            .unwrap();
        assert!(third.asset_id > second.asset_id);
        assert_eq!(reloaded.list_asset_groups().await.unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_readonly_file_is_not_writable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.yaml");
        std::fs::write(&path, "").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o444)).unwrap();

        // Root ignores file modes; nothing to check there.
        if std::fs::OpenOptions::new().append(true).open(&path).is_ok() {
            return;
        }
        assert!(!DataPersistence::check_write_access(&path));
    }

    #[test]
    fn test_writable_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.yaml");
        std::fs::write(&path, "").unwrap();
        assert!(DataPersistence::check_write_access(&path));
    }

    #[test]
    fn test_missing_file_is_writable() {
        let dir = TempDir::new().unwrap();
        assert!(DataPersistence::check_write_access(
            &dir.path().join("new.yaml")
        ));
    }
}
