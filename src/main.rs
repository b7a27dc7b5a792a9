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

// Allow println! in main.rs for CLI user-facing output (validate command)
#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use serviceapi::config::{load_config_file, save_config_file, ServiceApiConfig};
use serviceapi::ServiceApiServer;

#[derive(Parser)]
#[command(name = "serviceapi")]
#[command(about = "REST API for security indicators, assets, asset groups and services")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config/serviceapi.yaml", global = true)]
    config: PathBuf,

    /// Override the server port
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server (default if no subcommand specified)
    Run,
    /// Validate a configuration file without starting the server
    Validate {
        /// Show resolved configuration with environment variables expanded
        #[arg(long)]
        show_resolved: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate { show_resolved }) => validate_config(&cli.config, show_resolved),
        Some(Commands::Run) | None => run_server(cli.config, cli.port).await,
    }
}

/// Load `.env` from the config file's directory, if present.
fn load_env_file(config_path: &Path) -> Option<Result<PathBuf, dotenvy::Error>> {
    let env_file = config_path.parent()?.join(".env");
    if !env_file.exists() {
        return None;
    }
    Some(dotenvy::from_path(&env_file).map(|_| env_file))
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

async fn run_server(config_path: PathBuf, port_override: Option<u16>) -> Result<()> {
    let env_file = load_env_file(&config_path);

    let config_created = !config_path.exists();
    let config = if config_created {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut default_config = ServiceApiConfig::default();
        if let Some(port) = port_override {
            default_config.port = port;
        }
        save_config_file(&default_config, &config_path)?;
        default_config
    } else {
        load_config_file(&config_path)?
    };

    init_logging(&config.log_level);

    if config_created {
        warn!(
            "Config file '{}' not found. Default configuration created.",
            config_path.display()
        );
    }
    match env_file {
        Some(Ok(path)) => info!("Loaded environment variables from {}", path.display()),
        Some(Err(e)) => warn!("Failed to load .env file: {e}"),
        None => {}
    }

    info!("Starting Service API");
    debug!("Debug logging is enabled");
    info!("Config file: {}", config_path.display());
    let final_port = port_override.unwrap_or(config.port);
    info!("Port: {final_port}");
    debug!("Server configuration: {config:?}");

    let server = ServiceApiServer::new(config_path, port_override).await?;
    server.run().await?;

    Ok(())
}

/// Validate a configuration file
fn validate_config(config_path: &Path, show_resolved: bool) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[ERROR] Configuration file not found: {}",
            config_path.display()
        );
        std::process::exit(1);
    }

    if let Some(Err(e)) = load_env_file(config_path) {
        println!("[WARN] Failed to load .env file: {e}");
    }

    match load_config_file(config_path) {
        Ok(config) => {
            println!("[OK] Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Host: {}", config.host);
            println!("  Port: {}", config.port);
            println!("  Log Level: {}", config.log_level);
            match config.persistence_path() {
                Some(path) => println!("  Data file: {} (persisted)", path.display()),
                None => match &config.data_file {
                    Some(path) => println!("  Data file: {} (not persisted)", path.display()),
                    None => println!("  Data file: none (in-memory only)"),
                },
            }

            if show_resolved {
                println!();
                println!("Resolved configuration:");
                print!("{}", serde_yaml::to_string(&config)?);
            }

            Ok(())
        }
        Err(e) => {
            println!("[ERROR] Configuration is invalid:");
            println!("  {e}");
            std::process::exit(1);
        }
    }
}
