use clap::Parser;
use tracing::Level;

mod cli;
mod command;
mod config;
mod dispatch;
mod process;
mod summary;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    process::run(cli)
}
