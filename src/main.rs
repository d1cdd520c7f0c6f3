// CLI binary entry point for tagprobe

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Commands, Config, OutputFormatter};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let formatter = OutputFormatter::new(config.format, config.quiet);
    match &config.command {
        Commands::Read { paths } => cli::command_read(paths, &config.parse_options(), &formatter),
        Commands::Detect { paths } => cli::command_detect(paths, &formatter),
    }
}
