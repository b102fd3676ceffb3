//! Runtime configuration.
//!
//! Every setting is a command line flag with an environment variable
//! fallback. A `.env` file in the working directory is loaded before
//! arguments are parsed, so deployments only need to provide the
//! environment.

use anyhow::{Result, bail};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_BUBBLEMAPS_API_URL: &str = "https://api-legacy.bubblemaps.io";
pub const DEFAULT_BUBBLEMAPS_APP_URL: &str = "https://app.bubblemaps.io";
pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Token value shipped in the example `.env` file
const PLACEHOLDER_TOKEN: &str = "your_telegram_bot_token_here";

/// Telegram's upper bound for long-poll timeouts
const MAX_POLL_TIMEOUT_SECS: u64 = 50;

#[derive(Args, Debug, Clone)]
pub struct TelegramArgs {
    /// Telegram bot token from @BotFather
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true, global = true)]
    pub telegram_token: Option<String>,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_TELEGRAM_API_URL, global = true)]
    pub telegram_api_url: String,

    /// Long-poll timeout for getUpdates, in seconds
    #[arg(long, env = "POLL_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub poll_timeout_secs: u64,

    /// Maximum number of analyses running at the same time
    #[arg(long, env = "MAX_CONCURRENT_ANALYSES", default_value_t = 2, global = true)]
    pub max_concurrent_analyses: usize,
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Bubblemaps API base URL
    #[arg(long, env = "BUBBLEMAPS_API_URL", default_value = DEFAULT_BUBBLEMAPS_API_URL, global = true)]
    pub bubblemaps_api_url: String,

    /// Bubblemaps web app base URL, used for links and screenshots
    #[arg(long, env = "BUBBLEMAPS_APP_URL", default_value = DEFAULT_BUBBLEMAPS_APP_URL, global = true)]
    pub bubblemaps_app_url: String,

    /// CoinGecko API base URL
    #[arg(long, env = "COINGECKO_API_URL", default_value = DEFAULT_COINGECKO_API_URL, global = true)]
    pub coingecko_api_url: String,

    /// Optional CoinGecko API key
    #[arg(long, env = "COINGECKO_API_KEY", hide_env_values = true, global = true)]
    pub coingecko_api_key: Option<String>,

    /// Timeout for Bubblemaps and CoinGecko requests, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 20, global = true)]
    pub http_timeout_secs: u64,
}

impl SourceArgs {
    /// Check the data source settings shared by `run` and `analyze`
    pub fn validate(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            bail!("HTTP_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[derive(Args, Debug, Clone)]
pub struct BrowserArgs {
    /// Path to the Chrome or Chromium binary
    #[arg(long, env = "CHROME_PATH", global = true)]
    pub chrome_path: Option<PathBuf>,

    /// Seconds to wait for the bubble map to appear
    #[arg(long, env = "CAPTURE_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub capture_timeout_secs: u64,

    /// Seconds to let the bubble map finish rendering
    #[arg(long, env = "RENDER_DELAY_SECS", default_value_t = 5, global = true)]
    pub render_delay_secs: u64,
}

/// Validated settings for the polling bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    pub telegram_api_url: String,
    pub poll_timeout: Duration,
    pub max_concurrent_analyses: usize,
}

impl TelegramArgs {
    /// Check the Telegram settings needed to run the bot
    pub fn validate(&self) -> Result<BotConfig> {
        let token = self
            .telegram_token
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if token.is_empty() || token == PLACEHOLDER_TOKEN {
            bail!("Please set the TELEGRAM_TOKEN environment variable in .env file");
        }

        if self.poll_timeout_secs == 0 || self.poll_timeout_secs > MAX_POLL_TIMEOUT_SECS {
            bail!(
                "POLL_TIMEOUT_SECS must be between 1 and {}, got {}",
                MAX_POLL_TIMEOUT_SECS,
                self.poll_timeout_secs
            );
        }

        if self.max_concurrent_analyses == 0 {
            bail!("MAX_CONCURRENT_ANALYSES must be at least 1");
        }

        Ok(BotConfig {
            telegram_token: token.to_string(),
            telegram_api_url: self.telegram_api_url.clone(),
            poll_timeout: Duration::from_secs(self.poll_timeout_secs),
            max_concurrent_analyses: self.max_concurrent_analyses,
        })
    }
}
