use crate::error::{Error, Result};
use crate::output::ReadmeTemplate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "readme-mcp.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub analysis: AnalysisConfig,
    pub readme: ReadmeConfig,
    pub server: ServerConfig,
}

/// Directory scanning settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Depth used when a caller does not ask for one
    pub max_depth: usize,
    /// Entry names containing any of these substrings are skipped
    pub ignore: Vec<String>,
}

/// Project analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Manifest read for name, version, scripts and dependencies
    pub manifest_file: String,
}

/// README rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadmeConfig {
    /// Closing line of every generated README
    pub footer: String,
    /// Tera template used instead of the embedded one
    pub template_file: Option<PathBuf>,
    /// Section metadata reported alongside analysis results
    pub template: ReadmeTemplate,
}

/// MCP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub instructions: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            ignore: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
                "build".to_string(),
                ".next".to_string(),
                "coverage".to_string(),
            ],
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            manifest_file: "package.json".to_string(),
        }
    }
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        Self {
            footer: "_This README was generated by readme-mcp._".to_string(),
            template_file: None,
            template: ReadmeTemplate::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            instructions: "Inspect a local project directory and generate a README for it. \
                Use analyze_project to see the extracted metadata, \
                generate_readme for the document."
                .to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, depth: Option<usize>, ignore: Vec<String>) {
        if let Some(d) = depth {
            self.scan.max_depth = d;
        }

        if !ignore.is_empty() {
            self.scan.ignore.extend(ignore);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.max_depth == 0 {
            return Err(Error::config_validation("max_depth must be at least 1"));
        }

        if self.scan.max_depth > 100 {
            return Err(Error::config_validation("max_depth cannot exceed 100"));
        }

        // An empty pattern is a substring of every name and would hide the whole tree
        if self.scan.ignore.iter().any(|p| p.is_empty()) {
            return Err(Error::config_validation("ignore patterns must not be empty"));
        }

        if self.analysis.manifest_file.trim().is_empty() {
            return Err(Error::config_validation("manifest_file must be set"));
        }

        if self.readme.template.sections.is_empty() {
            return Err(Error::config_validation("at least one template section required"));
        }

        Ok(())
    }
}
