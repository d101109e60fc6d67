//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect a project directory and generate its README
#[derive(Parser, Debug)]
#[command(name = "readme-mcp")]
#[command(about = "Inspect a project directory and generate its README")]
#[command(version)]
pub struct Args {
    /// Config file path (defaults to ./readme-mcp.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the README tools over MCP on stdio
    Serve,

    /// Print the scanned directory tree as JSON
    Tree {
        /// Directory to scan
        path: PathBuf,

        /// Levels to descend
        #[arg(long)]
        depth: Option<usize>,

        /// Extra ignore substrings (can be repeated)
        #[arg(long)]
        ignore: Vec<String>,
    },

    /// Print the project analysis as JSON
    Analyze {
        /// Project root
        path: PathBuf,

        /// Extra ignore substrings (can be repeated)
        #[arg(long)]
        ignore: Vec<String>,
    },

    /// Generate a README for a project
    Generate {
        /// Project root
        path: PathBuf,

        /// Write the README here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Levels of the project structure to include
        #[arg(long)]
        depth: Option<usize>,

        /// Extra ignore substrings (can be repeated)
        #[arg(long)]
        ignore: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve() {
        let args = Args::try_parse_from(["readme-mcp", "serve"]).unwrap();
        assert!(matches!(args.command, Command::Serve));
        assert!(args.config.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_tree_defaults() {
        let args = Args::try_parse_from(["readme-mcp", "tree", "./project"]).unwrap();
        match args.command {
            Command::Tree { path, depth, ignore } => {
                assert_eq!(path, PathBuf::from("./project"));
                assert_eq!(depth, None);
                assert!(ignore.is_empty());
            }
            _ => panic!("Expected Tree command"),
        }
    }

    #[test]
    fn test_generate_with_options() {
        let args = Args::try_parse_from([
            "readme-mcp",
            "generate",
            "./project",
            "--output",
            "/tmp/README.md",
            "--depth",
            "2",
            "--ignore",
            "target",
            "--ignore",
            "vendor",
            "--config",
            "custom.toml",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert!(args.verbose);
        match args.command {
            Command::Generate { path, output, depth, ignore } => {
                assert_eq!(path, PathBuf::from("./project"));
                assert_eq!(output, Some(PathBuf::from("/tmp/README.md")));
                assert_eq!(depth, Some(2));
                assert_eq!(ignore, vec!["target".to_string(), "vendor".to_string()]);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_analyze_requires_path() {
        assert!(Args::try_parse_from(["readme-mcp", "analyze"]).is_err());
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let args = Args::try_parse_from(["readme-mcp", "-v", "analyze", "."]).unwrap();
        assert!(args.verbose);
    }
}
