use anyhow::Result;
use clap::Parser;

use dotsync::reconcile;
use dotsync::report::Reporter;
use dotsync::runtime::RealRuntime;

/// dotsync - Sync locally installed packages with chezmoi configuration
///
/// Detects packages installed on your system but not tracked in
/// .chezmoidata.yaml, allowing you to selectively add them to your
/// dotfiles repo.
#[derive(Parser, Debug)]
#[command(author, version = env!("DOTSYNC_VERSION"), about)]
struct Cli {
    /// Debug mode - show detected packages without making changes
    #[arg(short = 'd', long)]
    debug: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;
    let reporter = Reporter::auto();

    match reconcile::run(&runtime, &reporter, cli.debug) {
        Ok(()) => Ok(()),
        // In debug mode let the error propagate so anyhow prints the chain.
        Err(error) if cli.debug => Err(error),
        Err(error) => {
            reporter.error(&format!("Error: {}", error));
            std::process::exit(1);
        }
    }
}
