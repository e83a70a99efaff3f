use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod matching;
mod parsing;
mod report;
mod search;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries the run summary
    let filter = if cli.verbose {
        EnvFilter::new("amr_locator=debug,info")
    } else {
        EnvFilter::new("amr_locator=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Locate(args) => {
            cli::locate::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Map(args) => {
            cli::map::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
