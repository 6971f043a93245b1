//! API server command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use maquette_server::{ApiServer, ServerConfig};

/// Configuration file structure (maquette.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    server: ServerSettings,
    #[serde(default)]
    content: ContentSettings,
    #[serde(default)]
    data: DataSettings,
}

#[derive(Debug, Deserialize)]
struct ServerSettings {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_public")]
    public: String,
    #[serde(default = "default_body_limit_mb")]
    body_limit_mb: usize,
}

#[derive(Debug, Deserialize)]
struct ContentSettings {
    #[serde(default = "default_templates")]
    templates: String,
    #[serde(default = "default_sections")]
    sections: String,
}

#[derive(Debug, Deserialize)]
struct DataSettings {
    #[serde(default = "default_data")]
    dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3001
}
fn default_public() -> String {
    "public".to_string()
}
fn default_body_limit_mb() -> usize {
    50
}
fn default_templates() -> String {
    "templates".to_string()
}
fn default_sections() -> String {
    "sections".to_string()
}
fn default_data() -> String {
    "data".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public: default_public(),
            body_limit_mb: default_body_limit_mb(),
        }
    }
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            templates: default_templates(),
            sections: default_sections(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: default_data(),
        }
    }
}

/// Load configuration from maquette.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Run the serve command.
pub async fn run(config_path: &Path, port: Option<u16>) -> Result<()> {
    let file_config = load_config(config_path)?;

    let config = ServerConfig {
        host: file_config.server.host,
        port: port.unwrap_or(file_config.server.port),
        public_dir: PathBuf::from(&file_config.server.public),
        templates_dir: PathBuf::from(&file_config.content.templates),
        sections_dir: PathBuf::from(&file_config.content.sections),
        data_dir: PathBuf::from(&file_config.data.dir),
        body_limit: file_config.server.body_limit_mb * 1024 * 1024,
    };

    ApiServer::new(config).start().await?;

    Ok(())
}
