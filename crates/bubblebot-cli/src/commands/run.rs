use crate::analysis::TokenAnalyzer;
use crate::bot::Bot;
use crate::config::{BrowserArgs, SourceArgs, TelegramArgs};
use anyhow::{Context, Result};
use bubblebot_sources::build_http_client;
use bubblebot_telegram::BotApi;
use std::sync::Arc;

pub fn execute(telegram: &TelegramArgs, sources: &SourceArgs, browser: &BrowserArgs) -> Result<()> {
    let config = telegram.validate()?;
    sources.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let analyzer = TokenAnalyzer::from_args(sources, browser, true)?;
        if !analyzer.has_capture() {
            tracing::warn!("Running without a browser: analyses will be sent as text only");
        }

        // getUpdates sets its own timeout, so the shared client timeout only covers the other calls
        let http = build_http_client(sources.http_timeout())?;
        let api = BotApi::new(http, &config.telegram_api_url, &config.telegram_token);

        let me = api
            .get_me()
            .await
            .context("Failed to reach Telegram; check TELEGRAM_TOKEN")?;
        tracing::info!(
            "Starting bot @{}",
            me.username.as_deref().unwrap_or(&me.first_name)
        );

        Bot::new(api, Arc::new(analyzer), &config).run().await
    })
}
