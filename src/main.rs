use clap::Parser;
use ghportfolio::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries the report
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ghportfolio=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ghportfolio=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.run()
}
