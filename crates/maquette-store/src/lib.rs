//! Filesystem-backed stores for maquette.
//!
//! Three stores back the builder API: a read-only catalog of templates and
//! sections discovered by directory scan, a read/write project store holding
//! one JSON document per project, and an upload store that decodes data URLs
//! into files under the public asset root.

pub mod catalog;
pub mod clock;
pub mod error;
pub mod project;
pub mod upload;

pub use catalog::{CatalogEntry, CatalogStore};
pub use error::StoreError;
pub use project::{ProjectStore, ProjectSummary};
pub use upload::UploadStore;
