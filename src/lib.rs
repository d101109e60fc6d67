//! readme-mcp - Inspect a project directory and generate its README
//!
//! Scans a project tree, reads its manifest, detects the technologies in use
//! and renders a Markdown README. The same operations are served to agents
//! as MCP tools.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod server;

// Re-export main types
pub use analysis::{Analyzer, DirectoryNode, ProjectMetadata, Scanner};
pub use config::Config;
pub use error::{Error, Result, ScanError};
pub use output::{ReadmeRenderer, ReadmeTemplate};
pub use server::{ReadmeServer, ToolOutput, Toolbox};
