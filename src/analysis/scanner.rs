// Directory scanning
//
// Builds a depth-bounded tree of a project directory. Entries whose name
// contains an ignore pattern are skipped along with everything below them.
// Symlinked directories are followed; the depth bound is the only guard
// against symlink cycles.

use crate::config::ScanConfig;
use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A node of the scanned project tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DirectoryNode {
    File {
        name: String,
        path: PathBuf,
    },
    Directory {
        name: String,
        children: Vec<DirectoryNode>,
    },
}

impl DirectoryNode {
    pub fn name(&self) -> &str {
        match self {
            DirectoryNode::File { name, .. } | DirectoryNode::Directory { name, .. } => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, DirectoryNode::Directory { .. })
    }

    /// Children of a directory; files have none
    pub fn children(&self) -> &[DirectoryNode] {
        match self {
            DirectoryNode::Directory { children, .. } => children,
            DirectoryNode::File { .. } => &[],
        }
    }

    /// Number of levels below this node (a leaf has depth 0)
    pub fn depth(&self) -> usize {
        self.children()
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Recursive directory lister with ignore filtering
#[derive(Debug, Clone)]
pub struct Scanner {
    max_depth: usize,
    ignore: Vec<String>,
}

impl Scanner {
    /// Create a scanner from explicit settings
    pub fn new(max_depth: usize, ignore: Vec<String>) -> Self {
        Self { max_depth, ignore }
    }

    /// Create a scanner from the scan section of the config
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.max_depth, config.ignore.clone())
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether an entry name matches any ignore pattern (case-sensitive substring)
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|pattern| name.contains(pattern.as_str()))
    }

    /// Scan `root` using the configured depth
    pub fn scan(&self, root: &Path) -> Result<DirectoryNode, ScanError> {
        self.scan_with_depth(root, self.max_depth)
    }

    /// Scan `root` down to `max_depth` levels.
    ///
    /// The root itself is always returned. With `max_depth == 0` it has no
    /// children. A subdirectory whose depth reaches the bound is left out of
    /// its parent entirely, while files at that level are still listed.
    pub fn scan_with_depth(
        &self,
        root: &Path,
        max_depth: usize,
    ) -> Result<DirectoryNode, ScanError> {
        let metadata = fs::metadata(root).map_err(|e| ScanError::new(root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::new(
                root,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }

        tracing::debug!("Scanning {} (max depth {})", root.display(), max_depth);

        let children = self.scan_children(root, max_depth, 0)?.unwrap_or_default();
        Ok(DirectoryNode::Directory {
            name: node_name(root),
            children,
        })
    }

    /// List one directory level. `None` means the depth bound was reached and
    /// the directory is omitted by its caller.
    fn scan_children(
        &self,
        dir: &Path,
        max_depth: usize,
        current_depth: usize,
    ) -> Result<Option<Vec<DirectoryNode>>, ScanError> {
        if current_depth >= max_depth {
            return Ok(None);
        }

        let mut children = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| ScanError::new(dir, e))? {
            let entry = entry.map_err(|e| ScanError::new(dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if self.is_ignored(&name) {
                continue;
            }

            let path = entry.path();
            // follows symlinks
            if path.is_dir() {
                let nested = self.scan_children(&path, max_depth, current_depth + 1)?;
                if let Some(grandchildren) = nested {
                    children.push(DirectoryNode::Directory {
                        name,
                        children: grandchildren,
                    });
                }
            } else {
                children.push(DirectoryNode::File { name, path });
            }
        }

        Ok(Some(children))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

/// Display name of a directory, falling back to the path as given
fn node_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
