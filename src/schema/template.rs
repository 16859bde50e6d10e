//! HTML templates for component rendering

use rust_embed::Embed;
use std::path::Path;
use tera::Tera;
use thiserror::Error;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Template renderer using Tera
///
/// Templates ending in `.html` are auto-escaped, so values inserted into
/// them are safe unless a template explicitly marks them `| safe`.
pub struct TemplateRenderer {
    tera: Tera,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

impl TemplateRenderer {
    /// Create a renderer with the embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Create a renderer whose templates may be overridden from a directory
    ///
    /// Every `*.html` file in `dir` replaces the embedded template with the
    /// same file name, or adds a new one.
    pub fn with_overrides(dir: &Path) -> Result<Self, TemplateError> {
        let mut renderer = Self::new()?;

        let entries = std::fs::read_dir(dir).map_err(|e| {
            TemplateError::NotFound(format!("{}: {}", dir.display(), e))
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            tracing::debug!(template = name, path = %path.display(), "overriding template");
            renderer
                .tera
                .add_template_file(&path, Some(name))
                .map_err(|e| TemplateError::RenderError(e.to_string()))?;
        }

        Ok(renderer)
    }

    /// Check whether a template is loaded
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render a named template with the given context
    pub fn render(&self, name: &str, context: &tera::Context) -> Result<String, TemplateError> {
        if !self.has_template(name) {
            return Err(TemplateError::NotFound(name.to_string()));
        }
        self.tera
            .render(name, context)
            .map_err(|e| TemplateError::RenderError(describe_tera_error(&e)))
    }
}

/// Flatten a Tera error and its causes into one message
fn describe_tera_error(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_templates_loaded() {
        let renderer = TemplateRenderer::new().unwrap();
        assert!(renderer.has_template("error.html"));
        assert!(renderer.has_template("form.html"));
    }

    #[test]
    fn test_error_template_escapes_text() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = tera::Context::new();
        context.insert("text", "<b>bad</b>");
        let html = renderer.render("error.html", &context).unwrap();
        assert_eq!(html.trim(), r#"<p class="error">&lt;b&gt;bad&lt;&#x2F;b&gt;</p>"#);
    }

    #[test]
    fn test_missing_template() {
        let renderer = TemplateRenderer::new().unwrap();
        let result = renderer.render("nope.html", &tera::Context::new());
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_override_directory_replaces_template() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("error.html"),
            r#"<span class="oops">{{ text }}</span>"#,
        )
        .unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let renderer = TemplateRenderer::with_overrides(tmp.path()).unwrap();
        let mut context = tera::Context::new();
        context.insert("text", "hi");
        assert_eq!(
            renderer.render("error.html", &context).unwrap(),
            r#"<span class="oops">hi</span>"#
        );
        assert!(renderer.has_template("form.html"));
        assert!(!renderer.has_template("notes.txt"));
    }
}
