//! HTML page shell rendering.

use minijinja::{context, Environment};

/// Renders the fixed page shell around an exported HTML fragment.
///
/// The shell links the sibling `css/style.css` and `js/script.js` files the
/// generator writes next to it.
pub struct ShellEngine {
    env: Environment<'static>,
}

impl ShellEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("page.html".to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");

        Self { env }
    }

    /// Render the shell with the caller's fragment embedded verbatim.
    ///
    /// The fragment is not sanitized; what the editor submits is what the
    /// export contains.
    pub fn render_page(&self, fragment: &str) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("page.html")?;
        tmpl.render(context! { content => fragment })
    }
}

impl Default for ShellEngine {
    fn default() -> Self {
        Self::new()
    }
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Exported Site</title>
    <link rel="stylesheet" href="css/style.css">
</head>
<body>
    {{ content | safe }}
    <script src="js/script.js"></script>
</body>
</html>"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_fragment_verbatim() {
        let engine = ShellEngine::new();
        let html = engine.render_page("<p>hi</p>").unwrap();

        assert!(html.contains("<p>hi</p>"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn links_bundle_css_and_js() {
        let engine = ShellEngine::new();
        let html = engine.render_page("").unwrap();

        assert!(html.contains(r#"<link rel="stylesheet" href="css/style.css">"#));
        assert!(html.contains(r#"<script src="js/script.js"></script>"#));
    }

    #[test]
    fn does_not_escape_markup() {
        let engine = ShellEngine::new();
        let html = engine
            .render_page(r#"<div class="hero"><h1>Title &amp; more</h1></div>"#)
            .unwrap();

        assert!(html.contains(r#"<div class="hero">"#));
        assert!(!html.contains("&lt;div"));
    }
}
