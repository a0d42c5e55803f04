//! Page template rendering via `minijinja`.
//!
//! Templates are loaded lazily from the filesystem (default: `templates/`
//! directory) so operators can restyle pages without recompiling. Each
//! [`Page`] renders `<template>.html` with its [`ViewModel`] as the
//! context; `.html` templates are auto-escaped.

use std::path::Path;

use dexstats_core::{Page, ViewModel};
use minijinja::Environment;

/// Errors from template lookup or rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A template is missing, fails to parse, or fails to render.
    #[error("template {name}: {source}")]
    Template {
        /// Template file name.
        name: String,
        /// The underlying `minijinja` error.
        source: minijinja::Error,
    },
}

/// Renders page view-models into HTML.
#[derive(Debug)]
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer loading `<name>.html` files from `templates_dir`.
    pub fn from_dir(templates_dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(templates_dir.to_path_buf()));
        tracing::info!(dir = %templates_dir.display(), "Template loader configured");
        Self { env }
    }

    /// Create a renderer from in-memory `(file name, source)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if a source fails to parse.
    pub fn from_sources<I>(sources: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut env = Environment::new();
        for (name, source) in sources {
            env.add_template_owned(name.clone(), source)
                .map_err(|source| RenderError::Template { name, source })?;
        }
        Ok(Self { env })
    }

    /// File name of the template backing `page`.
    pub fn template_name(page: Page) -> String {
        format!("{}.html", page.template())
    }

    /// Check that every page in `pages` has a template that parses.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] for the first missing or broken
    /// template.
    pub fn ensure_templates(&self, pages: &[Page]) -> Result<(), RenderError> {
        for &page in pages {
            let name = Self::template_name(page);
            self.env
                .get_template(&name)
                .map_err(|source| RenderError::Template { name, source })?;
        }
        Ok(())
    }

    /// Render `page` with `view_model` as the template context.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the template is missing or
    /// rendering fails.
    pub fn render(&self, page: Page, view_model: &ViewModel) -> Result<String, RenderError> {
        let name = Self::template_name(page);
        let rendered = self
            .env
            .get_template(&name)
            .and_then(|template| template.render(view_model));
        rendered.map_err(|source| RenderError::Template { name, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::from_sources([
            (
                String::from("index.html"),
                String::from("<h1>{{ title }}</h1>"),
            ),
            (
                String::from("gyms.html"),
                String::from("{% for c in cities %}[{{ c.name }}]{% endfor %}"),
            ),
        ])
        .unwrap_or_else(|_| TemplateRenderer::from_dir(Path::new("missing")))
    }

    #[test]
    fn renders_view_model_fields() {
        let mut vm = ViewModel::new();
        assert!(vm.insert("title", "Dex <Stats>").is_ok());
        let html = renderer().render(Page::Index, &vm);
        assert_eq!(html.ok().as_deref(), Some("<h1>Dex &lt;Stats&gt;</h1>"));
    }

    #[test]
    fn renders_lists_in_order() {
        let mut vm = ViewModel::new();
        let cities = serde_json::json!([{ "name": "A" }, { "name": "B" }]);
        assert!(vm.insert("cities", &cities).is_ok());
        let html = renderer().render(Page::Gyms, &vm);
        assert_eq!(html.ok().as_deref(), Some("[A][B]"));
    }

    #[test]
    fn missing_template_is_an_error() {
        let result = renderer().render(Page::Nests, &ViewModel::new());
        assert!(matches!(result, Err(RenderError::Template { name, .. }) if name == "nests.html"));
        assert!(renderer().ensure_templates(&[Page::Index, Page::Gyms]).is_ok());
        assert!(renderer().ensure_templates(&[Page::Quests]).is_err());
    }

    #[test]
    fn broken_source_is_rejected() {
        let result = TemplateRenderer::from_sources([(
            String::from("index.html"),
            String::from("{% for %}"),
        )]);
        assert!(result.is_err());
    }
}
