use std::path::PathBuf;
use thiserror::Error;

/// A directory that could not be listed while building the project tree
#[derive(Error, Debug)]
#[error("Failed to scan directory {}: {source}", path.display())]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl ScanError {
    /// Wrap an IO failure for the given directory
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// readme-mcp error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Failed to analyze project {}: {source}", path.display())]
    Analysis {
        path: PathBuf,
        #[source]
        source: ScanError,
    },

    #[error("Failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for readme-mcp operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Wrap a scan failure that happened while analyzing `path`
    pub fn analysis(path: impl Into<PathBuf>, source: ScanError) -> Self {
        Error::Analysis {
            path: path.into(),
            source,
        }
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Error::InvalidArguments(msg.into())
    }

    /// Create a server error
    pub fn server(msg: impl Into<String>) -> Self {
        Error::Server(msg.into())
    }
}
