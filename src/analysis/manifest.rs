// Project manifest loading
//
// Reads the package descriptor at the project root. A missing or malformed
// manifest is not an error: analysis continues with every field unset.
// Fields are extracted one by one, so a field of an unexpected shape only
// leaves that field unset.

use serde_json::{Map, Value};
use std::path::Path;

/// Fields read from a `package.json`-style manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    /// Plain string or structured `{name, email, url}`
    pub author: Option<Value>,
    pub license: Option<String>,
    pub homepage: Option<String>,
    /// Plain URL or structured `{type, url}`
    pub repository: Option<Value>,
    /// Script name to command, in manifest order
    pub scripts: Option<Map<String, Value>>,
    pub dependencies: Option<Map<String, Value>>,
    pub dev_dependencies: Option<Map<String, Value>>,
}

impl Manifest {
    /// Parse manifest JSON. Fails only if the text is not a JSON object.
    pub fn parse(contents: &str) -> serde_json::Result<Self> {
        let fields: Map<String, Value> = serde_json::from_str(contents)?;
        Ok(Self::from_fields(&fields))
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            name: text_field(fields, "name"),
            description: text_field(fields, "description"),
            version: text_field(fields, "version"),
            author: fields
                .get("author")
                .filter(|v| v.is_string() || v.is_object())
                .cloned(),
            license: license_field(fields),
            homepage: text_field(fields, "homepage"),
            repository: fields
                .get("repository")
                .filter(|v| v.is_string() || v.is_object())
                .cloned(),
            scripts: object_field(fields, "scripts"),
            dependencies: object_field(fields, "dependencies"),
            dev_dependencies: object_field(fields, "devDependencies"),
        }
    }

    /// Read `file_name` from `root`, or `None` if it is absent or unparsable
    pub fn load(root: &Path, file_name: &str) -> Option<Self> {
        let path = root.join(file_name);
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!("No manifest at {}: {}", path.display(), e);
                return None;
            }
        };

        match Self::parse(&contents) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::warn!("Ignoring malformed manifest {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Dependency names in manifest order
    pub fn dependency_names(&self) -> Option<Vec<String>> {
        self.dependencies.as_ref().map(|deps| deps.keys().cloned().collect())
    }

    /// Dev dependency names in manifest order
    pub fn dev_dependency_names(&self) -> Option<Vec<String>> {
        self.dev_dependencies
            .as_ref()
            .map(|deps| deps.keys().cloned().collect())
    }
}

/// Strings as given, numbers as their text, anything else unset
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// SPDX string, or the `type` of the legacy `{type, url}` object
fn license_field(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("license")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("type").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn object_field(fields: &Map<String, Value>, key: &str) -> Option<Map<String, Value>> {
    fields.get(key).and_then(Value::as_object).cloned()
}
