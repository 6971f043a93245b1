//! API server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use maquette_export::ExportGenerator;
use maquette_store::{CatalogStore, ProjectStore, UploadStore};

use crate::routes;

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Public root served at `/` (editor bundle, uploaded assets)
    pub public_dir: PathBuf,

    /// Template catalog root
    pub templates_dir: PathBuf,

    /// Section catalog root
    pub sections_dir: PathBuf,

    /// Data root holding `projects/` and `exports/`
    pub data_dir: PathBuf,

    /// Request body cap in bytes
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            public_dir: PathBuf::from("public"),
            templates_dir: PathBuf::from("templates"),
            sections_dir: PathBuf::from("sections"),
            data_dir: PathBuf::from("data"),
            // Matches the editor's largest payloads: full-page exports and
            // inline base64 images.
            body_limit: 50 * 1024 * 1024,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}: {1}")]
    AddrError(String, String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),
}

/// Shared server state: the stores and the export generator.
///
/// The stores hold only paths, so a plain `Arc` is enough; concurrent writes
/// to the same project or export id are last-writer-wins by design.
pub struct AppState {
    pub catalog: CatalogStore,
    pub projects: ProjectStore,
    pub uploads: UploadStore,
    pub exports: ExportGenerator,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            catalog: CatalogStore::new(&config.templates_dir, &config.sections_dir),
            projects: ProjectStore::new(config.data_dir.join("projects")),
            uploads: UploadStore::new(config.public_dir.join("assets").join("uploads")),
            exports: ExportGenerator::new(config.data_dir.join("exports")),
        }
    }
}

/// Build the full application router for a config.
pub fn app(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState::from_config(config));

    Router::new()
        .nest("/api", routes::api_router())
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(config.body_limit))
        .with_state(state)
}

/// The maquette API server.
pub struct ApiServer {
    config: ServerConfig,
}

impl ApiServer {
    /// Create a new API server.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Start serving requests.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr_string = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = addr_string
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ServerError::AddrError(addr_string.clone(), e.to_string())
            })?;

        let app = app(&self.config);

        tracing::info!("maquette API listening at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}
