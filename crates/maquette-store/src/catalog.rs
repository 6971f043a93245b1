//! Template and section catalog discovery.
//!
//! The catalog is a directory tree authored by hand: `templates/<name>/` and
//! `sections/<category>/<name>/`, each leaf holding a `config.json`
//! descriptor. The store only ever reads it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// A discovered template or section descriptor.
///
/// Known fields are typed; anything else in `config.json` is preserved in
/// `extra` and serialized back verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Storage location, derived from the directory name at scan time.
    #[serde(default)]
    pub path: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Read-only catalog of templates and sections.
pub struct CatalogStore {
    templates_dir: PathBuf,
    sections_dir: PathBuf,
}

impl CatalogStore {
    pub fn new(templates_dir: impl Into<PathBuf>, sections_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            sections_dir: sections_dir.into(),
        }
    }

    /// List all templates.
    ///
    /// One-level scan of the template root. An entry whose `config.json` is
    /// missing or malformed is logged and skipped; siblings still appear.
    /// Order is directory-scan order, not sorted.
    pub fn list_templates(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let mut entries = Vec::new();

        for dir in fs::read_dir(&self.templates_dir)? {
            let dir = dir?;
            if !dir.path().is_dir() {
                continue;
            }

            let name = dir.file_name().to_string_lossy().into_owned();
            match read_config(&dir.path().join("config.json")) {
                Ok(mut entry) => {
                    entry.path = format!("/templates/{}", name);
                    entries.push(entry);
                }
                Err(e) => {
                    tracing::warn!("skipping template {}: {}", name, e);
                }
            }
        }

        Ok(entries)
    }

    /// List all sections across every category.
    ///
    /// Two-level scan: category directories, then section directories within
    /// each. The category name overrides whatever `config.json` declares.
    /// Same per-entry skip policy as templates.
    pub fn list_sections(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let mut entries = Vec::new();

        for category_dir in fs::read_dir(&self.sections_dir)? {
            let category_dir = category_dir?;
            if !category_dir.path().is_dir() {
                continue;
            }

            let category = category_dir.file_name().to_string_lossy().into_owned();

            for section_dir in fs::read_dir(category_dir.path())? {
                let section_dir = section_dir?;
                if !section_dir.path().is_dir() {
                    continue;
                }

                let name = section_dir.file_name().to_string_lossy().into_owned();
                match read_config(&section_dir.path().join("config.json")) {
                    Ok(mut entry) => {
                        entry.category = Some(category.clone());
                        entry.path = format!("/sections/{}/{}", category, name);
                        entries.push(entry);
                    }
                    Err(e) => {
                        tracing::warn!("skipping section {}/{}: {}", category, name, e);
                    }
                }
            }
        }

        Ok(entries)
    }
}

fn read_config(path: &Path) -> Result<CatalogEntry, StoreError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(path.display().to_string())
        } else {
            StoreError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(dir: &Path, body: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("config.json"), body).unwrap();
    }

    fn config_body(id: &str, name: &str) -> String {
        format!(
            r#"{{"id":"{}","name":"{}","version":"1.0.0","author":"tests"}}"#,
            id, name
        )
    }

    #[test]
    fn lists_templates_with_derived_path() {
        let temp = tempdir().unwrap();
        let templates = temp.path().join("templates");
        write_config(&templates.join("landing"), &config_body("landing", "Landing"));

        let store = CatalogStore::new(&templates, temp.path().join("sections"));
        let entries = store.list_templates().unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "landing");
        assert_eq!(entries[0].path, "/templates/landing");
    }

    #[test]
    fn malformed_config_is_skipped_not_fatal() {
        let temp = tempdir().unwrap();
        let templates = temp.path().join("templates");
        write_config(&templates.join("a"), &config_body("a", "A"));
        write_config(&templates.join("b"), "{ not json");
        write_config(&templates.join("c"), &config_body("c", "C"));

        let store = CatalogStore::new(&templates, temp.path().join("sections"));
        let entries = store.list_templates().unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.id == "a" || e.id == "c"));
    }

    #[test]
    fn directory_without_config_is_skipped() {
        let temp = tempdir().unwrap();
        let templates = temp.path().join("templates");
        write_config(&templates.join("a"), &config_body("a", "A"));
        fs::create_dir_all(templates.join("empty")).unwrap();

        let store = CatalogStore::new(&templates, temp.path().join("sections"));
        assert_eq!(store.list_templates().unwrap().len(), 1);
    }

    #[test]
    fn unreadable_root_is_an_error() {
        let temp = tempdir().unwrap();
        let store = CatalogStore::new(
            temp.path().join("does-not-exist"),
            temp.path().join("sections"),
        );

        assert!(store.list_templates().is_err());
    }

    #[test]
    fn sections_get_category_from_parent_directory() {
        let temp = tempdir().unwrap();
        let sections = temp.path().join("sections");
        write_config(
            &sections.join("headers").join("header-classic"),
            // Config declares a category; the directory wins.
            r#"{"id":"header-classic","name":"Classic Header","category":"misc"}"#,
        );
        write_config(
            &sections.join("footers").join("footer-simple"),
            &config_body("footer-simple", "Simple Footer"),
        );

        let store = CatalogStore::new(temp.path().join("templates"), &sections);
        let mut entries = store.list_sections().unwrap();
        entries.sort_by(|a, b| a.id.cmp(&b.id));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category.as_deref(), Some("footers"));
        assert_eq!(entries[0].path, "/sections/footers/footer-simple");
        assert_eq!(entries[1].category.as_deref(), Some("headers"));
    }

    #[test]
    fn unknown_config_fields_are_preserved() {
        let temp = tempdir().unwrap();
        let templates = temp.path().join("templates");
        write_config(
            &templates.join("landing"),
            r#"{"id":"landing","name":"Landing","preview":"thumb.png"}"#,
        );

        let store = CatalogStore::new(&templates, temp.path().join("sections"));
        let entries = store.list_templates().unwrap();

        assert_eq!(
            entries[0].extra.get("preview").and_then(Value::as_str),
            Some("thumb.png")
        );
    }
}
