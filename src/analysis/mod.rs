// Project analysis: scan the tree, read the manifest, detect technologies

pub mod detect;
pub mod manifest;
pub mod scanner;
pub mod tree;

pub use detect::*;
pub use manifest::*;
pub use scanner::*;
pub use tree::*;

use crate::config::Config;
use crate::error::{Error, Result, ScanError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Everything known about a project after analysis
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    /// Directory that was analyzed
    pub project_path: PathBuf,
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub author: Option<Value>,
    pub license: Option<String>,
    pub homepage: Option<String>,
    pub repository: Option<Value>,
    pub scripts: Option<Map<String, Value>>,
    pub dependencies: Option<Vec<String>>,
    pub dev_dependencies: Option<Vec<String>>,
    pub detected_technologies: Vec<String>,
    pub config_files: Vec<String>,
    /// Immediate entries of the project root, unfiltered
    pub root_files: BTreeSet<String>,
    pub structure: DirectoryNode,
    pub structure_text: String,
}

impl ProjectMetadata {
    /// Directory base name used when the manifest has no name
    pub fn directory_name(&self) -> String {
        if let Some(name) = self.project_path.file_name() {
            return name.to_string_lossy().into_owned();
        }
        // paths like "." or "/repo/.." have no final component
        self.project_path
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "Project".to_string())
    }

    /// Manifest name, else the directory name
    pub fn title(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.directory_name())
    }

    /// Repository URL, whether given as a string or as `{url}`
    pub fn repository_url(&self) -> Option<String> {
        match self.repository.as_ref()? {
            Value::String(url) => Some(url.clone()),
            Value::Object(obj) => obj.get("url").and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    }

    pub fn has_technology(&self, tech: &str) -> bool {
        self.detected_technologies.iter().any(|t| t == tech)
    }

    pub fn has_dependencies(&self) -> bool {
        let non_empty =
            |deps: &Option<Vec<String>>| deps.as_ref().map_or(false, |d| !d.is_empty());
        non_empty(&self.dependencies) || non_empty(&self.dev_dependencies)
    }
}

/// Builds `ProjectMetadata` for a directory
#[derive(Debug, Clone)]
pub struct Analyzer {
    scanner: Scanner,
    manifest_file: String,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: &Config) -> Self {
        Self {
            scanner: Scanner::from_config(&config.scan),
            manifest_file: config.analysis.manifest_file.clone(),
        }
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Analyze the project at `root`.
    ///
    /// Only a failure to scan the tree is fatal; a missing or broken manifest
    /// leaves the manifest fields unset.
    pub fn analyze(&self, root: &Path) -> Result<ProjectMetadata> {
        tracing::debug!("Analyzing project {}", root.display());

        // Step 1: Scan the tree
        let structure = self
            .scanner
            .scan(root)
            .map_err(|e| Error::analysis(root, e))?;

        // Step 2: Manifest (recoverable)
        let manifest = Manifest::load(root, &self.manifest_file).unwrap_or_default();

        // Step 3: Root listing
        let root_files = list_root_files(root).map_err(|e| Error::analysis(root, e))?;

        // Step 4: Technologies
        let detection = detect(&root_files);
        tracing::debug!(
            "Detected technologies {:?}, config files {:?}",
            detection.technologies,
            detection.config_files
        );

        // Step 5: Text tree
        let structure_text = render_tree(&structure);

        let dependencies = manifest.dependency_names();
        let dev_dependencies = manifest.dev_dependency_names();

        Ok(ProjectMetadata {
            project_path: root.to_path_buf(),
            name: manifest.name,
            description: manifest.description,
            version: manifest.version,
            author: manifest.author,
            license: manifest.license,
            homepage: manifest.homepage,
            repository: manifest.repository,
            scripts: manifest.scripts,
            dependencies,
            dev_dependencies,
            detected_technologies: detection.technologies,
            config_files: detection.config_files,
            root_files,
            structure,
            structure_text,
        })
    }
}

/// Names of the immediate entries of `root`, without ignore filtering
pub fn list_root_files(root: &Path) -> std::result::Result<BTreeSet<String>, ScanError> {
    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(root).map_err(|e| ScanError::new(root, e))? {
        let entry = entry.map_err(|e| ScanError::new(root, e))?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_node_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{
                "name": "widget",
                "version": "2.1.0",
                "repository": {"type": "git", "url": "https://github.com/acme/widget.git"},
                "dependencies": {"react": "^18"},
                "devDependencies": {"vitest": "^1"}
            }"#,
        )
        .unwrap();
        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        fs::write(dir.path().join(".env.example"), "KEY=").unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/index.ts"), "").unwrap();
        fs::create_dir_all(dir.path().join("node_modules/react")).unwrap();
        dir
    }

    #[test]
    fn test_analyze_node_project() {
        let dir = create_node_project();
        let metadata = Analyzer::new(&Config::default()).analyze(dir.path()).unwrap();

        assert_eq!(metadata.name.as_deref(), Some("widget"));
        assert_eq!(metadata.version.as_deref(), Some("2.1.0"));
        assert_eq!(metadata.detected_technologies, vec!["Node.js", "TypeScript"]);
        assert_eq!(
            metadata.config_files,
            vec!["package.json", "tsconfig.json", ".env.example"]
        );
        assert_eq!(metadata.dependencies, Some(vec!["react".to_string()]));
        assert_eq!(metadata.dev_dependencies, Some(vec!["vitest".to_string()]));
        assert_eq!(
            metadata.repository_url().as_deref(),
            Some("https://github.com/acme/widget.git")
        );
        assert!(metadata.has_dependencies());
    }

    #[test]
    fn test_root_files_are_unfiltered() {
        let dir = create_node_project();
        let metadata = Analyzer::new(&Config::default()).analyze(dir.path()).unwrap();

        assert!(metadata.root_files.contains("node_modules"));
        assert!(!metadata.structure.children().iter().any(|c| c.name() == "node_modules"));
        assert!(!metadata.structure_text.contains("node_modules"));
    }

    #[test]
    fn test_structure_text_matches_tree() {
        let dir = create_node_project();
        let metadata = Analyzer::new(&Config::default()).analyze(dir.path()).unwrap();

        assert!(metadata.structure_text.contains("src/\n  index.ts\n"));
        assert_eq!(metadata.structure_text, render_tree(&metadata.structure));
    }

    #[test]
    fn test_malformed_manifest_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{\"name\": ").unwrap();

        let metadata = Analyzer::new(&Config::default()).analyze(dir.path()).unwrap();
        assert!(metadata.name.is_none());
        assert!(metadata.scripts.is_none());
        // the marker still counts
        assert_eq!(metadata.detected_technologies, vec!["Node.js"]);
    }

    #[test]
    fn test_missing_directory_is_analysis_error() {
        let err = Analyzer::new(&Config::default())
            .analyze(Path::new("/no/such/project"))
            .unwrap_err();
        assert!(matches!(err, Error::Analysis { .. }));
        assert!(err.to_string().contains("/no/such/project"));
    }

    #[test]
    fn test_title_falls_back_to_directory_name() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("tidy-app");
        fs::create_dir(&project).unwrap();

        let metadata = Analyzer::new(&Config::default()).analyze(&project).unwrap();
        assert_eq!(metadata.title(), "tidy-app");
    }

    #[test]
    fn test_empty_manifest_name_falls_back_to_directory_name() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("proj");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("package.json"), r#"{"name": ""}"#).unwrap();

        let metadata = Analyzer::new(&Config::default()).analyze(&project).unwrap();
        assert_eq!(metadata.title(), "proj");
    }

    #[test]
    fn test_legacy_license_keeps_other_manifest_fields() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{
                "name": "foo",
                "version": "1.0.0",
                "license": {"type": "MIT", "url": "x"},
                "scripts": {"test": "jest"},
                "dependencies": {"a": "1"}
            }"#,
        )
        .unwrap();

        let metadata = Analyzer::new(&Config::default()).analyze(dir.path()).unwrap();
        assert_eq!(metadata.name.as_deref(), Some("foo"));
        assert_eq!(metadata.license.as_deref(), Some("MIT"));
        assert!(metadata.scripts.is_some());
        assert_eq!(metadata.dependencies, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_list_root_files_missing_directory() {
        let err = list_root_files(Path::new("/no/such/root")).unwrap_err();
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_repository_url_string_form() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"repository": "https://example.com/repo"}"#,
        )
        .unwrap();

        let metadata = Analyzer::new(&Config::default()).analyze(dir.path()).unwrap();
        assert_eq!(metadata.repository_url().as_deref(), Some("https://example.com/repo"));
    }

    #[test]
    fn test_custom_manifest_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("meta.json"), r#"{"name": "custom"}"#).unwrap();

        let mut config = Config::default();
        config.analysis.manifest_file = "meta.json".to_string();
        let metadata = Analyzer::new(&config).analyze(dir.path()).unwrap();
        assert_eq!(metadata.name.as_deref(), Some("custom"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let dir = create_node_project();
        let metadata = Analyzer::new(&Config::default()).analyze(dir.path()).unwrap();
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["detectedTechnologies"][0], "Node.js");
        assert_eq!(json["devDependencies"][0], "vitest");
        assert!(json["structureText"].is_string());
        assert_eq!(json["structure"]["type"], "directory");
    }
}
