mod cli;
mod error;
mod logging;
mod manifest;
mod progress;
mod run;

use clap::Parser;
use cli::Cli;
use tracing::error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone()) {
        eprintln!("❌ Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run::run(&cli) {
        error!("Benchmark failed: {}", e);
        eprintln!("❌ Benchmark failed: {}", e);
        std::process::exit(1);
    }

    if !cli.quiet {
        eprintln!("✅ Benchmark complete. Results written to {}", cli.output_file.display());
    }
}
