use std::process::ExitCode;

fn main() -> ExitCode {
    readme_mcp::cli::run()
}
