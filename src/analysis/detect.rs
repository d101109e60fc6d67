// Technology detection from marker files
//
// Each marker lists candidate file names checked against the project root.
// The first candidate present wins, so a marker contributes at most one
// config file and one technology label.

use std::collections::BTreeSet;

/// A root-level file whose presence implies a technology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Candidate file names, checked in order
    pub files: &'static [&'static str],
    /// Technology label, or `None` for config-only markers
    pub technology: Option<&'static str>,
}

/// Marker table, in the order technologies are reported
pub const MARKERS: &[Marker] = &[
    Marker {
        files: &["package.json"],
        technology: Some("Node.js"),
    },
    Marker {
        files: &["tsconfig.json"],
        technology: Some("TypeScript"),
    },
    Marker {
        files: &["requirements.txt", "setup.py"],
        technology: Some("Python"),
    },
    Marker {
        files: &["Cargo.toml"],
        technology: Some("Rust"),
    },
    Marker {
        files: &["go.mod"],
        technology: Some("Go"),
    },
    Marker {
        files: &["pom.xml"],
        technology: Some("Java"),
    },
    Marker {
        files: &["build.gradle"],
        technology: Some("Java/Gradle"),
    },
    Marker {
        files: &["Dockerfile"],
        technology: Some("Docker"),
    },
    Marker {
        files: &[".env.example", ".env.template"],
        technology: None,
    },
];

/// Outcome of matching the marker table against a root listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    pub technologies: Vec<String>,
    pub config_files: Vec<String>,
}

impl Marker {
    /// First candidate present in `root_files`
    pub fn matches(&self, root_files: &BTreeSet<String>) -> Option<&'static str> {
        self.files.iter().copied().find(|f| root_files.contains(*f))
    }
}

/// Run every marker once against the root listing
pub fn detect(root_files: &BTreeSet<String>) -> Detection {
    detect_with(MARKERS, root_files)
}

/// Run a custom marker table against the root listing
pub fn detect_with(markers: &[Marker], root_files: &BTreeSet<String>) -> Detection {
    let mut detection = Detection::default();

    for marker in markers {
        if let Some(file) = marker.matches(root_files) {
            detection.config_files.push(file.to_string());
            if let Some(tech) = marker.technology {
                detection.technologies.push(tech.to_string());
            }
        }
    }

    detection
}
