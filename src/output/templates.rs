// Template engine for generating README output

use crate::error::{Error, Result};
use std::path::Path;
use tera::{Context, Tera};

/// Name the README template is registered under
pub const README_TEMPLATE: &str = "readme.md";

/// Template engine wrapping Tera with the embedded README template
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with the embedded template
    pub fn new() -> Result<Self> {
        Self::from_source(include_str!("../../templates/readme.md.tera"))
    }

    /// Create a template engine from a custom template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        Self::from_source(&source)
    }

    /// Create a template engine from template source text
    pub fn from_source(source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(README_TEMPLATE, source)?;
        Ok(Self { tera })
    }

    /// Render a template with context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Get the underlying Tera instance for advanced usage
    pub fn tera(&self) -> &Tera {
        &self.tera
    }
}
