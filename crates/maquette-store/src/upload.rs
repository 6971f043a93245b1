//! Image upload handling.
//!
//! Uploads arrive as base64 data URLs. The store decodes the payload, writes
//! it under the public asset root with a timestamp prefix, and hands back the
//! URL the browser can reference it by. Nothing ever reads, lists, or deletes
//! uploaded files server-side.

use std::fs;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::clock;
use crate::error::StoreError;

/// URL prefix the stored files are reachable under when the public root is
/// served at `/`.
const PUBLIC_PREFIX: &str = "/assets/uploads";

/// Write-only store for uploaded assets.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Decode a data URL and persist it under `<millis>-<filename>`.
    ///
    /// The part before the first comma (the MIME prefix) is discarded; the
    /// remainder is decoded as standard base64. The filename is taken as
    /// given: it is not sanitized, so path-component characters pass through
    /// (a known limitation of the builder, not tightened here). Returns the
    /// public URL of the stored file.
    pub fn store(&self, data_url: &str, filename: &str) -> Result<String, StoreError> {
        let (_, payload) = data_url
            .split_once(',')
            .ok_or(StoreError::InvalidDataUrl)?;

        let bytes = STANDARD.decode(payload)?;

        fs::create_dir_all(&self.dir)?;

        let unique_name = format!("{}-{}", clock::millis_id(), filename);
        fs::write(self.dir.join(&unique_name), bytes)?;

        Ok(format!("{}/{}", PUBLIC_PREFIX, unique_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn decodes_and_stores_data_url() {
        let temp = tempdir().unwrap();
        let store = UploadStore::new(temp.path().join("uploads"));

        let bytes = b"\x89PNG fake image bytes";
        let data_url = format!("data:image/png;base64,{}", STANDARD.encode(bytes));

        let url = store.store(&data_url, "x.png").unwrap();

        assert!(url.starts_with("/assets/uploads/"));
        assert!(url.ends_with("x.png"));

        let stored_name = url.rsplit('/').next().unwrap();
        let stored = fs::read(temp.path().join("uploads").join(stored_name)).unwrap();
        assert_eq!(stored, bytes);
    }

    #[test]
    fn name_is_timestamp_prefixed() {
        let temp = tempdir().unwrap();
        let store = UploadStore::new(temp.path().join("uploads"));

        let data_url = format!("data:image/gif;base64,{}", STANDARD.encode(b"gif"));
        let url = store.store(&data_url, "loader.gif").unwrap();

        let name = url.rsplit('/').next().unwrap();
        let (prefix, rest) = name.split_once('-').unwrap();
        assert!(prefix.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(rest, "loader.gif");
    }

    #[test]
    fn rejects_payload_without_comma() {
        let temp = tempdir().unwrap();
        let store = UploadStore::new(temp.path().join("uploads"));

        assert!(matches!(
            store.store("no comma here", "x.png"),
            Err(StoreError::InvalidDataUrl)
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        let temp = tempdir().unwrap();
        let store = UploadStore::new(temp.path().join("uploads"));

        assert!(matches!(
            store.store("data:image/png;base64,@@not-base64@@", "x.png"),
            Err(StoreError::Decode(_))
        ));
    }
}
