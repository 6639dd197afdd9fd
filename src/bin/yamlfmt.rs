use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use dotsync::format::{self, FormatOptions};
use dotsync::report::Reporter;
use dotsync::runtime::RealRuntime;

/// yamlfmt - Normalize YAML files to the canonical style
///
/// With no paths, recursively formats every .yml/.yaml file under the
/// current directory. Files that are comment-only or blank are skipped.
#[derive(Parser, Debug)]
#[command(author, version = env!("DOTSYNC_VERSION"), about)]
struct Cli {
    /// Do not write files; exit 1 if changes are required
    #[arg(long)]
    check: bool,

    /// Write changes in-place (backing up to <file>.bak)
    #[arg(long)]
    apply: bool,

    /// Files or directories to format
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;
    let reporter = Reporter::auto();

    let options = FormatOptions {
        check: cli.check,
        apply: cli.apply,
        paths: cli.paths,
    };

    match format::run(&runtime, &reporter, &options) {
        Ok(code) => ExitCode::from(code as u8),
        Err(error) => {
            reporter.error(&format!("Error: {}", error));
            ExitCode::from(2)
        }
    }
}
