use anyhow::Result;
use bubblebot_cli::cli::{Cli, Commands};
use bubblebot_cli::commands;
use bubblebot_cli::commands::analyze::AnalyzeOptions;
use clap::Parser;

fn main() -> Result<()> {
    // Settings may come from a .env file in the working directory
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::execute(&cli.telegram, &cli.sources, &cli.browser),
        Commands::Analyze {
            address,
            chain,
            screenshot_dir,
            format,
        } => commands::analyze::execute(
            AnalyzeOptions {
                address: &address,
                chain: &chain,
                screenshot_dir: screenshot_dir.as_deref(),
                format,
            },
            &cli.sources,
            &cli.browser,
        ),
        Commands::Chains { format } => commands::chains::execute(format),
        Commands::Completion { shell } => commands::completion::execute(shell),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("bubblebot=debug,chromiumoxide=warn")
        } else {
            EnvFilter::new("bubblebot=info")
        }
    });

    // stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
