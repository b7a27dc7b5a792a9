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

use anyhow::Result;
use axum::{routing::get, Router};
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api::v1::handlers;
use crate::api::ApiVersion;
use crate::config::{load_config_file, ServiceApiConfig};
use crate::persistence::DataPersistence;
use crate::store::{InMemoryStore, SharedStore};

pub struct ServiceApiServer {
    host: String,
    port: u16,
    config_file_path: Option<PathBuf>,
    store: SharedStore,
    read_only: Arc<bool>,
    data_persistence: Option<Arc<DataPersistence>>,
}

impl ServiceApiServer {
    /// Create a new server from a configuration file
    pub async fn new(config_path: PathBuf, port_override: Option<u16>) -> Result<Self> {
        let mut config = load_config_file(&config_path)?;
        if let Some(port) = port_override {
            config.port = port;
        }

        let mut server = Self::from_config(config)?;
        server.config_file_path = Some(config_path);
        Ok(server)
    }

    /// Create a server from an already loaded configuration.
    ///
    /// Loads the data file when one is configured. The server is read-only
    /// when the data file exists but cannot be written.
    pub fn from_config(config: ServiceApiConfig) -> Result<Self> {
        config.validate()?;

        let snapshot = match &config.data_file {
            Some(path) => DataPersistence::load_snapshot(path)?,
            None => Default::default(),
        };
        let store: SharedStore = Arc::new(InMemoryStore::from_snapshot(snapshot)?);

        let read_only = config
            .data_file
            .as_deref()
            .is_some_and(|path| !DataPersistence::check_write_access(path));

        if read_only {
            warn!("Data file is not writable. API in READ-ONLY mode.");
            warn!("Cannot submit, change or delete records via API.");
        }

        let data_persistence = match config.persistence_path() {
            Some(path) if !read_only => {
                info!(
                    "Persistence ENABLED. API modifications will be saved to {}",
                    path.display()
                );
                Some(Arc::new(DataPersistence::new(path.clone(), store.clone())))
            }
            Some(_) => {
                info!("Data persistence disabled (read-only mode)");
                None
            }
            None => {
                if config.data_file.is_some() {
                    info!("Persistence disabled by configuration (persistData: false).");
                }
                warn!("API modifications will not persist across restarts.");
                None
            }
        };

        Ok(Self {
            host: config.host,
            port: config.port,
            config_file_path: None,
            store,
            read_only: Arc::new(read_only),
            data_persistence,
        })
    }

    pub fn is_read_only(&self) -> bool {
        *self.read_only
    }

    /// The complete application router
    pub fn router(&self) -> Router {
        build_router(
            self.store.clone(),
            self.read_only.clone(),
            self.data_persistence.clone(),
        )
    }

    #[allow(clippy::print_stdout)]
    pub async fn run(self) -> Result<()> {
        println!("Starting Service API");
        if let Some(config_file) = &self.config_file_path {
            println!("  Config file: {}", config_file.display());
        }
        println!("  API Port: {}", self.port);

        let app = self.router();
        let addr = format!("{}:{}", self.host, self.port);
        let v1 = ApiVersion::V1;
        info!("Starting web API on {addr}");
        info!("API {v1} available at http://{addr}{}/", v1.path_prefix());
        info!("Swagger UI available at http://{addr}{}/", v1.docs_path());

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Shutting down Service API");
        if let Some(persistence) = &self.data_persistence {
            persistence.save().await?;
        }

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}

/// Build the main application router around `store`.
pub fn build_router(
    store: SharedStore,
    read_only: Arc<bool>,
    data_persistence: Option<Arc<DataPersistence>>,
) -> Router {
    let v1 = ApiVersion::V1;
    let openapi_v1 = api::ApiDocV1::openapi();
    let v1_router = api::build_v1_router(store, read_only, data_persistence);

    Router::new()
        // Unversioned operational endpoints
        .route("/status", get(handlers::status))
        .route("/health", get(handlers::health_check))
        .route("/api/versions", get(handlers::list_api_versions))
        .nest(v1.path_prefix(), v1_router)
        .merge(SwaggerUi::new(v1.docs_path()).url(v1.openapi_path(), openapi_v1))
        .layer(CorsLayer::permissive())
}
