//! Project persistence.
//!
//! One pretty-printed JSON document per project under the store directory.
//! The payload is opaque to the server: it is stored and returned verbatim,
//! the store only cares about the `id` field.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::clock;
use crate::error::StoreError;

/// The projection returned by [`ProjectStore::list`].
///
/// Fields the document does not carry are omitted from the serialized form.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
}

/// Read/write store of project documents.
pub struct ProjectStore {
    dir: PathBuf,
}

impl ProjectStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist a project, assigning a timestamp-derived id when absent.
    ///
    /// Overwrites any existing document with the same id (last writer wins,
    /// no locking, no versioning). Returns the id the document was stored
    /// under.
    pub fn save(&self, mut project: Value) -> Result<String, StoreError> {
        let id = match project.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let id = clock::millis_id();
                if let Some(obj) = project.as_object_mut() {
                    obj.insert("id".to_string(), Value::String(id.clone()));
                }
                id
            }
        };

        fs::create_dir_all(&self.dir)?;

        let body = serde_json::to_string_pretty(&project).map_err(StoreError::Encode)?;
        fs::write(self.document_path(&id), body)?;

        Ok(id)
    }

    /// Load a project document by id.
    ///
    /// A missing file is `NotFound`, an unparseable file is `Corrupt`.
    pub fn load(&self, id: &str) -> Result<Value, StoreError> {
        let path = self.document_path(id);

        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(id.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path,
            message: e.to_string(),
        })
    }

    /// List summaries of every stored project.
    ///
    /// A store directory that has never been created is "no projects", not
    /// an error. A document that fails to parse is logged and skipped.
    pub fn list(&self) -> Result<Vec<ProjectSummary>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let mut projects = Vec::new();

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let doc: Value = match fs::read_to_string(&path)
                .map_err(StoreError::Io)
                .and_then(|s| {
                    serde_json::from_str(&s).map_err(|e| StoreError::Corrupt {
                        path: path.clone(),
                        message: e.to_string(),
                    })
                }) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!("skipping project file {}: {}", path.display(), e);
                    continue;
                }
            };

            projects.push(ProjectSummary {
                id: doc.get("id").cloned(),
                name: doc.get("name").cloned(),
                modified: doc.get("modified").cloned(),
                template: doc.get("template").cloned(),
            });
        }

        Ok(projects)
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}
