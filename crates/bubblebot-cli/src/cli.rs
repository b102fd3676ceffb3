use crate::OutputFormat;
use crate::config::{BrowserArgs, SourceArgs, TelegramArgs};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bubblebot")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Telegram bot for token distribution analysis with Bubblemaps and CoinGecko",
    long_about = "Bubblebot answers Telegram messages containing a token contract address with \
                  market data, decentralization metrics, top holders and a screenshot of the \
                  token's bubble map. Without a subcommand it starts the bot."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub telegram: TelegramArgs,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub browser: BrowserArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Telegram bot (default)
    Run,

    /// Analyze a single token and print the report
    Analyze {
        /// Token contract address (0x followed by 40 hex digits)
        #[arg(value_name = "ADDRESS")]
        address: String,

        /// Chain keyword (eth, bsc, ftm, avax, poly, arbi, base)
        #[arg(value_name = "CHAIN", default_value = "eth")]
        chain: String,

        /// Capture the bubble map and save it into this directory
        #[arg(long, value_name = "DIR")]
        screenshot_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },

    /// List supported chains
    Chains {
        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS: bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash: bubblebot completion --shell bash >> ~/.bashrc\n  \
                            zsh:  bubblebot completion --shell zsh > ~/.zfunc/_bubblebot")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["bubblebot"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_analyze_defaults() {
        let cli = Cli::try_parse_from([
            "bubblebot",
            "analyze",
            "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Analyze {
                chain,
                screenshot_dir,
                format,
                ..
            }) => {
                assert_eq!(chain, "eth");
                assert_eq!(screenshot_dir, None);
                assert_eq!(format, OutputFormat::Pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bubblebot",
            "analyze",
            "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce",
            "bsc",
            "--chrome-path",
            "/opt/chrome",
            "--http-timeout-secs",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.browser.chrome_path, Some(PathBuf::from("/opt/chrome")));
        assert_eq!(cli.sources.http_timeout_secs, 5);
    }
}
