//! One-time workspace provisioning.
//!
//! Creates the directory skeleton the server expects, the default color
//! palettes, and a starter template. Runs standalone; the server never calls
//! into this.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Directory skeleton, relative to the workspace root.
const DIRECTORIES: &[&str] = &[
    // Public
    "public/css/components",
    "public/css/themes",
    "public/js/core",
    "public/js/components",
    "public/js/utils",
    "public/js/lib",
    "public/assets/uploads",
    "public/assets/fonts",
    "public/assets/icons",
    "public/assets/ui",
    // Templates
    "templates/restaurant-modern",
    "templates/portfolio-creative",
    "templates/business-corporate",
    "templates/landing-page",
    // Sections
    "sections/headers/header-classic",
    "sections/headers/header-modern",
    "sections/headers/header-minimal",
    "sections/heroes/hero-video",
    "sections/heroes/hero-image",
    "sections/heroes/hero-slider",
    "sections/features/features-grid",
    "sections/features/features-list",
    "sections/galleries/gallery-grid",
    "sections/galleries/gallery-masonry",
    "sections/testimonials/testimonials-slider",
    "sections/testimonials/testimonials-grid",
    "sections/pricing/pricing-table",
    "sections/pricing/pricing-cards",
    "sections/contacts/contact-form",
    "sections/contacts/contact-map",
    "sections/footers/footer-simple",
    "sections/footers/footer-extended",
    // Data
    "data/clients",
    "data/projects",
    "data/exports",
    // Other
    "palettes",
    "plugins",
    "docs",
    "tests/unit",
    "tests/integration",
    "tests/e2e",
];

/// Placeholder files so the empty data directories survive a checkout.
const GITKEEP_FILES: &[&str] = &[
    "data/clients/.gitkeep",
    "data/projects/.gitkeep",
    "data/exports/.gitkeep",
    "public/assets/uploads/.gitkeep",
];

/// Run the setup command.
pub async fn run(root: &Path, force: bool) -> Result<()> {
    tracing::info!("Provisioning maquette workspace...");

    for dir in DIRECTORIES {
        create_directory(root, dir)?;
    }

    for file in GITKEEP_FILES {
        create_file(root, file, "", force)?;
    }

    create_file(root, "palettes/default.json", DEFAULT_PALETTES, force)?;

    create_file(
        root,
        "templates/template-starter/index.html",
        STARTER_TEMPLATE_HTML,
        force,
    )?;
    create_file(
        root,
        "templates/template-starter/style.css",
        STARTER_TEMPLATE_CSS,
        force,
    )?;
    create_file(
        root,
        "templates/template-starter/config.json",
        STARTER_TEMPLATE_CONFIG,
        force,
    )?;

    tracing::info!("Provisioning complete!");
    tracing::info!("Run 'maquette serve' to start the API server.");

    Ok(())
}

fn create_directory(root: &Path, dir: &str) -> Result<()> {
    fs::create_dir_all(root.join(dir)).with_context(|| format!("Failed to create {}", dir))?;
    tracing::info!("Created: {}", dir);
    Ok(())
}

fn create_file(root: &Path, file: &str, content: &str, force: bool) -> Result<()> {
    let path = root.join(file);

    if path.exists() && !force {
        tracing::debug!("Kept existing: {}", file);
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", file))?;
    }
    fs::write(&path, content).with_context(|| format!("Failed to write {}", file))?;
    tracing::info!("Created: {}", file);

    Ok(())
}

const DEFAULT_PALETTES: &str = r##"{
  "muted": [
    {
      "name": "Black Elegance",
      "primary": "#000000",
      "secondary": "#333333",
      "accent": "#666666",
      "background": "#FFFFFF",
      "text": "#000000"
    },
    {
      "name": "Minimal Gray",
      "primary": "#2c3e50",
      "secondary": "#7f8c8d",
      "accent": "#bdc3c7",
      "background": "#ecf0f1",
      "text": "#2c3e50"
    },
    {
      "name": "Pro Blue",
      "primary": "#0D47A1",
      "secondary": "#1976D2",
      "accent": "#42A5F5",
      "background": "#FAFAFA",
      "text": "#212121"
    }
  ],
  "vivid": [
    {
      "name": "Tropical Paradise",
      "primary": "#FF6B6B",
      "secondary": "#4ECDC4",
      "accent": "#FFE66D",
      "background": "#F7FFF7",
      "text": "#2D3436"
    },
    {
      "name": "Sunset Vibes",
      "primary": "#FF4757",
      "secondary": "#FF6348",
      "accent": "#FFA502",
      "background": "#FFF5F5",
      "text": "#2C2C2C"
    },
    {
      "name": "Ocean Dream",
      "primary": "#00B8D4",
      "secondary": "#00ACC1",
      "accent": "#0097A7",
      "background": "#E0F7FA",
      "text": "#004D40"
    }
  ]
}
"##;

const STARTER_TEMPLATE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>My Site</title>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <header class="header">
        <h1 class="logo editable">My Logo</h1>
        <nav class="nav">
            <a href="#home">Home</a>
            <a href="#about">About</a>
            <a href="#contact">Contact</a>
        </nav>
    </header>

    <section class="hero">
        <h2 class="hero-title editable">Welcome to my site</h2>
        <p class="hero-text editable">Built with maquette in a few minutes</p>
        <button class="cta-button editable">Get Started</button>
    </section>

    <footer class="footer">
        <p class="editable">&copy; 2024 My Site. All rights reserved.</p>
    </footer>
</body>
</html>
"##;

const STARTER_TEMPLATE_CSS: &str = r#"* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    color: #333;
    line-height: 1.6;
}

.header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 1rem 2rem;
    background: #fff;
    box-shadow: 0 2px 5px rgba(0,0,0,0.1);
}

.logo {
    font-size: 1.5rem;
    font-weight: bold;
}

.nav {
    display: flex;
    gap: 2rem;
}

.nav a {
    text-decoration: none;
    color: #333;
    transition: color 0.3s;
}

.nav a:hover {
    color: #007bff;
}

.hero {
    text-align: center;
    padding: 5rem 2rem;
    background: #f8f9fa;
}

.hero-title {
    font-size: 3rem;
    margin-bottom: 1rem;
}

.hero-text {
    font-size: 1.25rem;
    margin-bottom: 2rem;
    color: #666;
}

.cta-button {
    background: #007bff;
    color: white;
    border: none;
    padding: 1rem 2rem;
    font-size: 1.1rem;
    border-radius: 5px;
    cursor: pointer;
    transition: background 0.3s;
}

.cta-button:hover {
    background: #0056b3;
}

.footer {
    text-align: center;
    padding: 2rem;
    background: #333;
    color: white;
}
"#;

const STARTER_TEMPLATE_CONFIG: &str = r#"{
  "id": "template-starter",
  "name": "Starter Template",
  "version": "1.0.0",
  "category": "basic",
  "author": "maquette",
  "description": "A minimal template to get started quickly"
}
"#;
