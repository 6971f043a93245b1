//! Export bundle generation and download resolution.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use maquette_store::clock;

use crate::shell::ShellEngine;

/// An export submission from the editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
    /// Asset references from the page. Accepted but not copied into the
    /// bundle yet; see [`ExportGenerator::export`].
    #[serde(default)]
    pub assets: Vec<Value>,
    #[serde(default)]
    pub format: String,
}

/// A completed export.
#[derive(Debug, Clone)]
pub struct ExportRecord {
    pub export_id: String,
    pub download_url: String,
}

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("export not found: {0}")]
    NotFound(String),

    #[error("failed to render page shell: {0}")]
    Template(#[from] minijinja::Error),

    #[error("failed to write export: {0}")]
    Write(#[from] std::io::Error),
}

/// Writes export bundles under the exports directory and resolves them for
/// download.
pub struct ExportGenerator {
    exports_dir: PathBuf,
    shell: ShellEngine,
}

impl ExportGenerator {
    pub fn new(exports_dir: impl Into<PathBuf>) -> Self {
        Self {
            exports_dir: exports_dir.into(),
            shell: ShellEngine::new(),
        }
    }

    /// Write an export bundle and return its record.
    ///
    /// Only the `"html"` format produces files: the rendered shell plus the
    /// caller's CSS and JS verbatim. Submitted assets only create an empty
    /// `images/` directory; copying them in is not implemented yet. Any
    /// other format still yields an export id, just with an empty bundle
    /// directory (the builder has never rejected unknown formats).
    pub fn export(&self, request: &ExportRequest) -> Result<ExportRecord, ExportError> {
        let export_id = clock::millis_id();
        let bundle_dir = self.exports_dir.join(&export_id);

        fs::create_dir_all(&bundle_dir)?;

        if request.format == "html" {
            let index = self.shell.render_page(&request.html)?;
            fs::write(bundle_dir.join("index.html"), index)?;

            fs::create_dir_all(bundle_dir.join("css"))?;
            fs::create_dir_all(bundle_dir.join("js"))?;
            fs::write(bundle_dir.join("css").join("style.css"), &request.css)?;
            fs::write(bundle_dir.join("js").join("script.js"), &request.js)?;

            if !request.assets.is_empty() {
                fs::create_dir_all(bundle_dir.join("images"))?;
                tracing::warn!(
                    "export {}: {} submitted assets were not copied (asset copying is not implemented)",
                    export_id,
                    request.assets.len()
                );
            }
        } else {
            tracing::warn!(
                "export {}: unsupported format {:?}, bundle contains no files",
                export_id,
                request.format
            );
        }

        Ok(ExportRecord {
            download_url: format!("/api/download/{}", export_id),
            export_id,
        })
    }

    /// Resolve the downloadable file of an export bundle.
    ///
    /// Only `index.html` is ever served; the css/js/images siblings are left
    /// on disk (no ZIP packaging). A missing bundle and a bundle without an
    /// index both resolve to `NotFound`.
    pub fn resolve_download(&self, export_id: &str) -> Result<PathBuf, ExportError> {
        let index = self.exports_dir.join(export_id).join("index.html");

        if !index.is_file() {
            return Err(ExportError::NotFound(export_id.to_string()));
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn html_request() -> ExportRequest {
        ExportRequest {
            html: "<p>hi</p>".to_string(),
            css: "body{color:red}".to_string(),
            js: "console.log(1)".to_string(),
            assets: vec![],
            format: "html".to_string(),
        }
    }

    #[test]
    fn html_export_writes_full_bundle() {
        let temp = tempdir().unwrap();
        let generator = ExportGenerator::new(temp.path());

        let record = generator.export(&html_request()).unwrap();
        let bundle = temp.path().join(&record.export_id);

        let index = fs::read_to_string(bundle.join("index.html")).unwrap();
        assert!(index.contains("<p>hi</p>"));
        assert!(index.contains("css/style.css"));
        assert!(index.contains("js/script.js"));

        let css = fs::read_to_string(bundle.join("css").join("style.css")).unwrap();
        assert_eq!(css, "body{color:red}");

        let js = fs::read_to_string(bundle.join("js").join("script.js")).unwrap();
        assert_eq!(js, "console.log(1)");

        assert_eq!(record.download_url, format!("/api/download/{}", record.export_id));
    }

    #[test]
    fn download_resolves_index_byte_for_byte() {
        let temp = tempdir().unwrap();
        let generator = ExportGenerator::new(temp.path());

        let record = generator.export(&html_request()).unwrap();

        let resolved = generator.resolve_download(&record.export_id).unwrap();
        let downloaded = fs::read(&resolved).unwrap();
        let written = fs::read(
            temp.path()
                .join(&record.export_id)
                .join("index.html"),
        )
        .unwrap();

        assert_eq!(downloaded, written);
    }

    #[test]
    fn submitted_assets_create_images_dir_but_copy_nothing() {
        let temp = tempdir().unwrap();
        let generator = ExportGenerator::new(temp.path());

        let mut request = html_request();
        request.assets = vec![json!({"url": "/assets/uploads/123-x.png"})];

        let record = generator.export(&request).unwrap();
        let images = temp.path().join(&record.export_id).join("images");

        assert!(images.is_dir());
        assert_eq!(fs::read_dir(&images).unwrap().count(), 0);
    }

    #[test]
    fn unknown_format_yields_id_but_no_files() {
        let temp = tempdir().unwrap();
        let generator = ExportGenerator::new(temp.path());

        let mut request = html_request();
        request.format = "zip".to_string();

        let record = generator.export(&request).unwrap();
        let bundle = temp.path().join(&record.export_id);

        assert!(bundle.is_dir());
        assert_eq!(fs::read_dir(&bundle).unwrap().count(), 0);
        assert!(matches!(
            generator.resolve_download(&record.export_id),
            Err(ExportError::NotFound(_))
        ));
    }

    #[test]
    fn missing_export_is_not_found() {
        let temp = tempdir().unwrap();
        let generator = ExportGenerator::new(temp.path());

        assert!(matches!(
            generator.resolve_download("123456"),
            Err(ExportError::NotFound(_))
        ));
    }
}
