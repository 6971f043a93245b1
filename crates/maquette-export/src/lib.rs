//! Static site export generator for maquette.
//!
//! Turns a submitted page (HTML fragment plus CSS and JS strings) into a
//! standalone bundle on disk: `index.html`, `css/style.css`, `js/script.js`.

pub mod generator;
pub mod shell;

pub use generator::{ExportError, ExportGenerator, ExportRecord, ExportRequest};
pub use shell::ShellEngine;
