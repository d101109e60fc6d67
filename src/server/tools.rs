// Tool definitions and dispatch
//
// The four operations exposed to agents, independent of the transport.
// Every failure is turned into an error-flagged text result at `dispatch`.

use crate::analysis::{Analyzer, ProjectMetadata};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{ReadmeRenderer, ReadmeTemplate};
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const READ_PROJECT_STRUCTURE: &str = "read_project_structure";
pub const READ_FILE: &str = "read_file";
pub const ANALYZE_PROJECT: &str = "analyze_project";
pub const GENERATE_README: &str = "generate_readme";

/// Arguments of `read_project_structure`
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadProjectStructureArgs {
    /// Directory to scan
    pub path: PathBuf,
    /// How many levels to descend (default 3)
    pub max_depth: Option<usize>,
}

/// Arguments of `read_file`
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileArgs {
    /// File to read
    pub path: PathBuf,
}

/// Arguments of `analyze_project` and `generate_readme`
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectArgs {
    /// Root directory of the project
    pub project_path: PathBuf,
}

/// Name, description and input schema of one tool
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Map<String, Value>,
}

/// Text result of a tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Error result; the text is prefixed with `Error: `
    pub fn error(err: &Error) -> Self {
        Self {
            text: format!("Error: {}", err),
            is_error: true,
        }
    }
}

/// Payload of `analyze_project`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport<'a> {
    pub template: &'a ReadmeTemplate,
    pub project_data: &'a ProjectMetadata,
}

/// The four README tools over a shared configuration
pub struct Toolbox {
    analyzer: Analyzer,
    renderer: ReadmeRenderer,
    template: ReadmeTemplate,
}

impl Toolbox {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            analyzer: Analyzer::new(config),
            renderer: ReadmeRenderer::new(&config.readme)?,
            template: config.readme.template.clone(),
        })
    }

    /// All tools with their input schemas
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: READ_PROJECT_STRUCTURE,
                description: "Read the directory structure of a project, skipping build output \
                    and dependency folders",
                input_schema: schema_for::<ReadProjectStructureArgs>(),
            },
            ToolDefinition {
                name: READ_FILE,
                description: "Read the contents of a file",
                input_schema: schema_for::<ReadFileArgs>(),
            },
            ToolDefinition {
                name: ANALYZE_PROJECT,
                description: "Analyze a project: manifest metadata, detected technologies, \
                    config files and structure, together with the README section template",
                input_schema: schema_for::<ProjectArgs>(),
            },
            ToolDefinition {
                name: GENERATE_README,
                description: "Generate a README.md for a project",
                input_schema: schema_for::<ProjectArgs>(),
            },
        ]
    }

    /// Run a tool by name. Never fails: errors come back flagged.
    pub fn dispatch(&self, name: &str, arguments: Option<Map<String, Value>>) -> ToolOutput {
        tracing::debug!("Calling tool {}", name);
        match self.call(name, arguments) {
            Ok(text) => ToolOutput::text(text),
            Err(e) => {
                tracing::warn!("Tool {} failed: {}", name, e);
                ToolOutput::error(&e)
            }
        }
    }

    fn call(&self, name: &str, arguments: Option<Map<String, Value>>) -> Result<String> {
        match name {
            READ_PROJECT_STRUCTURE => {
                let args: ReadProjectStructureArgs = parse_args(arguments)?;
                self.read_project_structure(&args.path, args.max_depth)
            }
            READ_FILE => {
                let args: ReadFileArgs = parse_args(arguments)?;
                self.read_file(&args.path)
            }
            ANALYZE_PROJECT => {
                let args: ProjectArgs = parse_args(arguments)?;
                self.analyze_project(&args.project_path)
            }
            GENERATE_README => {
                let args: ProjectArgs = parse_args(arguments)?;
                self.generate_readme(&args.project_path)
            }
            other => Err(Error::UnknownTool(other.to_string())),
        }
    }

    /// Scanned tree as JSON
    pub fn read_project_structure(&self, path: &Path, max_depth: Option<usize>) -> Result<String> {
        let scanner = self.analyzer.scanner();
        let depth = max_depth.unwrap_or_else(|| scanner.max_depth());
        let tree = scanner.scan_with_depth(path, depth)?;
        Ok(serde_json::to_string_pretty(&tree)?)
    }

    /// Raw file text
    pub fn read_file(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))
    }

    /// `{template, projectData}` as JSON
    pub fn analyze_project(&self, project_path: &Path) -> Result<String> {
        let metadata = self.analyzer.analyze(project_path)?;
        let report = AnalysisReport {
            template: &self.template,
            project_data: &metadata,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Rendered README
    pub fn generate_readme(&self, project_path: &Path) -> Result<String> {
        let metadata = self.analyzer.analyze(project_path)?;
        self.renderer.render(&metadata)
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Option<Map<String, Value>>) -> Result<T> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| Error::invalid_arguments(e.to_string()))
}

/// JSON Schema of an argument struct as a plain object
fn schema_for<T: JsonSchema>() -> Map<String, Value> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn toolbox() -> Toolbox {
        Toolbox::new(&Config::default()).unwrap()
    }

    fn args(value: Value) -> Option<Map<String, Value>> {
        value.as_object().cloned()
    }

    #[test]
    fn test_definitions() {
        let defs = toolbox().definitions();
        let names: Vec<&str> = defs.iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![READ_PROJECT_STRUCTURE, READ_FILE, ANALYZE_PROJECT, GENERATE_README]
        );

        let structure = &defs[0].input_schema;
        assert!(structure["properties"].get("maxDepth").is_some());
        assert_eq!(structure["required"], json!(["path"]));
        assert_eq!(defs[2].input_schema["required"], json!(["projectPath"]));
    }

    #[test]
    fn test_read_file_missing() {
        let output = toolbox().dispatch(READ_FILE, args(json!({"path": "/no/such/file.txt"})));
        assert!(output.is_error);
        assert!(output.text.starts_with("Error: "));
    }

    #[test]
    fn test_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "hello\nworld").unwrap();

        let output = toolbox().dispatch(READ_FILE, args(json!({"path": path})));
        assert_eq!(output, ToolOutput::text("hello\nworld"));
    }

    #[test]
    fn test_read_project_structure_default_depth() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c/d")).unwrap();
        fs::write(dir.path().join("a/b/file.txt"), "").unwrap();

        let output = toolbox().dispatch(READ_PROJECT_STRUCTURE, args(json!({"path": dir.path()})));
        assert!(!output.is_error, "{}", output.text);

        // third level lists files only; `c` would be a fourth level
        let tree: Value = serde_json::from_str(&output.text).unwrap();
        let b = &tree["children"][0]["children"][0];
        assert_eq!(b["name"], "b");
        assert_eq!(b["children"].as_array().unwrap().len(), 1);
        assert_eq!(b["children"][0]["name"], "file.txt");
    }

    #[test]
    fn test_read_project_structure_zero_depth() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("x.txt"), "").unwrap();

        let output = toolbox().dispatch(
            READ_PROJECT_STRUCTURE,
            args(json!({"path": dir.path(), "maxDepth": 0})),
        );
        let tree: Value = serde_json::from_str(&output.text).unwrap();
        assert_eq!(tree["children"], json!([]));
    }

    #[test]
    fn test_missing_required_argument() {
        let output = toolbox().dispatch(GENERATE_README, None);
        assert!(output.is_error);
        assert!(output.text.starts_with("Error: Invalid arguments"));
        assert!(output.text.contains("projectPath"));
    }

    #[test]
    fn test_unknown_tool() {
        let output = toolbox().dispatch("format_disk", None);
        assert!(output.is_error);
        assert_eq!(output.text, "Error: Unknown tool: format_disk");
    }

    #[test]
    fn test_analyze_project_payload() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("go.mod"), "module x").unwrap();

        let output = toolbox().dispatch(ANALYZE_PROJECT, args(json!({"projectPath": dir.path()})));
        assert!(!output.is_error, "{}", output.text);

        let payload: Value = serde_json::from_str(&output.text).unwrap();
        assert!(payload["template"]["sections"].as_array().unwrap().len() > 1);
        assert_eq!(payload["projectData"]["detectedTechnologies"], json!(["Go"]));
    }

    #[test]
    fn test_generate_readme_missing_project() {
        let output = toolbox().dispatch(
            GENERATE_README,
            args(json!({"projectPath": "/no/such/project"})),
        );
        assert!(output.is_error);
        assert!(output.text.starts_with("Error: Failed to analyze project"));
    }
}
