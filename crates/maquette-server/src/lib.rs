//! HTTP API server for the maquette website builder.
//!
//! A thin façade over the stores and the export generator: every route is a
//! direct translation between a JSON body and a filesystem operation. Static
//! files (the editor bundle and uploaded assets) are served from the public
//! root.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{ApiServer, AppState, ServerConfig, ServerError};
