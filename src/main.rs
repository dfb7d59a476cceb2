use clap::Parser;
use cutpath::cli::Cli;
use cutpath::{commands, init_logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;
    tracing::debug!(version = cutpath::VERSION, build = cutpath::BUILD_DATE, "Starting cutpath");

    let stdout = std::io::stdout();
    commands::run(&cli, &mut stdout.lock())
}
