use clap::Parser;
use tracing_subscriber::EnvFilter;

use pam_scan::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("pam_scan=debug,info")
    } else {
        EnvFilter::new("pam_scan=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Scan(args) => {
            cli::scan::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
