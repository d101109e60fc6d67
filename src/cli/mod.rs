//! CLI module for readme-mcp

mod args;

pub use args::{Args, Command};

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::server::{self, Toolbox};
use std::path::Path;
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    crate::logging::init(args.verbose);

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    let mut cfg = match &args.config {
        Some(config_path) => Config::load(config_path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    };

    match args.command {
        Command::Serve => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(&cfg))
        }

        Command::Tree { path, depth, ignore } => {
            cfg.merge_cli(None, ignore);
            let toolbox = Toolbox::new(&cfg)?;
            println!("{}", toolbox.read_project_structure(&path, depth)?);
            Ok(())
        }

        Command::Analyze { path, ignore } => {
            cfg.merge_cli(None, ignore);
            ensure_exists(&path)?;
            let toolbox = Toolbox::new(&cfg)?;
            println!("{}", toolbox.analyze_project(&path)?);
            Ok(())
        }

        Command::Generate {
            path,
            output,
            depth,
            ignore,
        } => {
            cfg.merge_cli(depth, ignore);
            ensure_exists(&path)?;
            let toolbox = Toolbox::new(&cfg)?;
            let readme = toolbox.generate_readme(&path)?;

            match output {
                Some(out) => {
                    std::fs::write(&out, readme)?;
                    tracing::info!("Wrote {}", out.display());
                }
                None => print!("{}", readme),
            }
            Ok(())
        }
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::PathNotFound(path.to_path_buf()))
    }
}
