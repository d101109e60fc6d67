// README rendering
//
// Turns ProjectMetadata into Markdown. Section order is fixed by the
// template; a section only appears when its data is present.

use crate::analysis::ProjectMetadata;
use crate::config::ReadmeConfig;
use crate::error::Result;
use crate::output::templates::{TemplateEngine, README_TEMPLATE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tera::Context;

/// Install command per technology, in priority order
pub const INSTALL_COMMANDS: &[(&str, &str)] = &[
    ("Node.js", "npm install"),
    ("Python", "pip install -r requirements.txt"),
    ("Rust", "cargo build"),
    ("Go", "go mod download"),
];

/// Technologies that get a badge: (label, color, logo)
pub const BADGE_TECHNOLOGIES: &[(&str, &str, &str)] = &[
    ("Node.js", "339933", "node.js"),
    ("TypeScript", "3178C6", "typescript"),
    ("Python", "3776AB", "python"),
    ("Rust", "000000", "rust"),
    ("Go", "00ADD8", "go"),
];

const CLONE_PLACEHOLDER: &str = "<repository-url>";
const RUN_PREFIX: &str = "npm run";

/// One section of a README, as reported to callers of the analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Ordered README section metadata.
///
/// Informational only: the renderer emits whatever sections have data,
/// regardless of `required`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmeTemplate {
    pub sections: Vec<TemplateSection>,
}

impl Default for ReadmeTemplate {
    fn default() -> Self {
        let section = |name: &str, description: &str, required: bool| TemplateSection {
            name: name.to_string(),
            description: description.to_string(),
            required,
        };

        Self {
            sections: vec![
                section("Title", "Project name from the manifest or directory", true),
                section("Badges", "Version, license and technology badges", false),
                section("Description", "Short summary of the project", true),
                section("Technologies", "Detected languages and tools", false),
                section("Installation", "How to get and set up the project", true),
                section("Usage", "Available scripts and how to run them", true),
                section("Project Structure", "Directory layout", false),
                section("Dependencies", "Runtime dependencies", false),
                section("Dev Dependencies", "Development dependencies", false),
                section("License", "License information", true),
                section("Author", "Project author", false),
                section("Links", "Homepage and repository", false),
            ],
        }
    }
}

#[derive(Debug, Serialize)]
struct ScriptEntry {
    name: String,
    command: String,
}

/// Values handed to the template
#[derive(Debug, Serialize)]
struct ReadmeContext {
    title: String,
    directory: String,
    badges: Vec<String>,
    description: Option<String>,
    technologies: Vec<String>,
    clone_command: String,
    install_command: Option<String>,
    run_prefix: &'static str,
    scripts: Vec<ScriptEntry>,
    structure: String,
    dependencies: Vec<String>,
    dev_dependencies: Vec<String>,
    license: Option<String>,
    author: Option<String>,
    homepage: Option<String>,
    repository_url: Option<String>,
    footer: String,
}

/// Renders README documents from project metadata
pub struct ReadmeRenderer {
    engine: TemplateEngine,
    footer: String,
}

impl ReadmeRenderer {
    /// Renderer using the embedded template or the configured override
    pub fn new(config: &ReadmeConfig) -> Result<Self> {
        let engine = match &config.template_file {
            Some(path) => TemplateEngine::from_file(path)?,
            None => TemplateEngine::new()?,
        };
        Ok(Self {
            engine,
            footer: config.footer.clone(),
        })
    }

    /// Render the README. Identical metadata always gives identical output.
    pub fn render(&self, metadata: &ProjectMetadata) -> Result<String> {
        let context = Context::from_serialize(self.build_context(metadata))?;
        self.engine.render(README_TEMPLATE, &context)
    }

    fn build_context(&self, metadata: &ProjectMetadata) -> ReadmeContext {
        let directory = metadata.directory_name();
        let repository_url = metadata.repository_url();

        let scripts = metadata
            .scripts
            .iter()
            .flatten()
            .map(|(name, command)| ScriptEntry {
                name: name.clone(),
                command: value_text(command),
            })
            .collect();

        ReadmeContext {
            title: metadata.title(),
            badges: badges(metadata),
            description: metadata.description.clone(),
            technologies: metadata.detected_technologies.clone(),
            clone_command: format!(
                "git clone {}",
                repository_url.as_deref().unwrap_or(CLONE_PLACEHOLDER)
            ),
            install_command: install_command(metadata).map(str::to_string),
            run_prefix: RUN_PREFIX,
            scripts,
            structure: metadata.structure_text.clone(),
            dependencies: metadata.dependencies.clone().unwrap_or_default(),
            dev_dependencies: metadata.dev_dependencies.clone().unwrap_or_default(),
            license: metadata.license.clone(),
            author: metadata.author.as_ref().map(author_text),
            homepage: metadata.homepage.clone(),
            repository_url,
            footer: self.footer.clone(),
            directory,
        }
    }
}

/// Install command for the first detected technology that has one
pub fn install_command(metadata: &ProjectMetadata) -> Option<&'static str> {
    INSTALL_COMMANDS
        .iter()
        .find(|(tech, _)| metadata.has_technology(tech))
        .map(|(_, cmd)| *cmd)
}

/// Badge images for version, license and well-known technologies
pub fn badges(metadata: &ProjectMetadata) -> Vec<String> {
    let mut badges = Vec::new();

    if let Some(version) = &metadata.version {
        badges.push(format!(
            "![Version](https://img.shields.io/badge/version-{}-blue)",
            shields_escape(version)
        ));
    }

    if let Some(license) = &metadata.license {
        badges.push(format!(
            "![License](https://img.shields.io/badge/license-{}-green)",
            shields_escape(license)
        ));
    }

    for (tech, color, logo) in BADGE_TECHNOLOGIES {
        if metadata.has_technology(tech) {
            badges.push(format!(
                "![{}](https://img.shields.io/badge/{}-{}?logo={}&logoColor=white)",
                tech,
                shields_escape(tech),
                color,
                logo
            ));
        }
    }

    badges
}

/// Escape text for a shields.io static badge path segment
pub fn shields_escape(s: &str) -> String {
    s.replace('-', "--").replace('_', "__").replace(' ', "_")
}

/// Author as text: strings verbatim, objects as `key: value` pairs
pub fn author_text(author: &Value) -> String {
    match author {
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value_text(value)))
            .collect::<Vec<_>>()
            .join(", "),
        other => value_text(other),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
