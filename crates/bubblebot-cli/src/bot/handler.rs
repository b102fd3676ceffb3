use crate::analysis::TokenAnalyzer;
use anyhow::Result;
use bubblebot_core::report::{FAILURE_MESSAGE, NOT_FOUND_MESSAGE, PROCESSING_MESSAGE, WELCOME_MESSAGE};
use bubblebot_core::{AnalysisRequest, parse_request};
use bubblebot_telegram::{BotApi, Message, Update};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// What to do with an incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Welcome,
    Analyze(String),
    Ignore,
}

/// `/start` greets, other commands are ignored, plain text is analyzed
pub fn route(message: &Message) -> Route {
    match message.command() {
        Some("start") => Route::Welcome,
        Some(_) => Route::Ignore,
        None => match message.text.as_deref() {
            Some(text) if !text.trim_start().starts_with('/') => Route::Analyze(text.to_string()),
            _ => Route::Ignore,
        },
    }
}

/// Answers a single update
pub struct UpdateHandler {
    api: BotApi,
    analyzer: Arc<TokenAnalyzer>,
    limiter: Semaphore,
}

impl UpdateHandler {
    pub fn new(api: BotApi, analyzer: Arc<TokenAnalyzer>, max_concurrent_analyses: usize) -> Self {
        Self {
            api,
            analyzer,
            limiter: Semaphore::new(max_concurrent_analyses.max(1)),
        }
    }

    pub async fn handle(&self, update: Update) -> Result<()> {
        let Some(message) = update.message else {
            tracing::debug!("Ignoring update {} without message", update.update_id);
            return Ok(());
        };
        let chat_id = message.chat.id;

        match route(&message) {
            Route::Welcome => {
                tracing::info!("Welcoming chat {}", chat_id);
                self.api.send_message(chat_id, WELCOME_MESSAGE).await?;
            }
            Route::Analyze(text) => self.handle_analysis(chat_id, &text).await?,
            Route::Ignore => {
                tracing::debug!("Ignoring message {} in chat {}", message.message_id, chat_id);
            }
        }

        Ok(())
    }

    async fn handle_analysis(&self, chat_id: i64, text: &str) -> Result<()> {
        let request = match parse_request(text) {
            Ok(request) => request,
            Err(e) => {
                tracing::info!("Rejected request in chat {}: {}", chat_id, e);
                self.api.send_message(chat_id, &e.reply_text()).await?;
                return Ok(());
            }
        };

        let processing = self.api.send_message(chat_id, PROCESSING_MESSAGE).await?;

        let _permit = self.limiter.acquire().await?;

        if let Err(e) = self.deliver(chat_id, processing.message_id, &request).await {
            tracing::error!("Error processing contract address {}: {:#}", request.address, e);
            self.api
                .edit_message_text(chat_id, processing.message_id, FAILURE_MESSAGE)
                .await?;
        }

        Ok(())
    }

    /// Run the analysis and replace the processing message with the results
    async fn deliver(&self, chat_id: i64, processing_id: i64, request: &AnalysisRequest) -> Result<()> {
        let Some(analysis) = self.analyzer.analyze(request).await? else {
            self.api
                .edit_message_text(chat_id, processing_id, NOT_FOUND_MESSAGE)
                .await?;
            return Ok(());
        };

        let report = self.analyzer.report(&analysis);

        match self.analyzer.capture(request).await? {
            Some(screenshot) => match report.as_caption() {
                Some(caption) => {
                    self.api
                        .send_photo(chat_id, screenshot.bytes, &screenshot.file_name, Some(caption))
                        .await?;
                }
                None => {
                    self.api
                        .send_photo(chat_id, screenshot.bytes, &screenshot.file_name, None)
                        .await?;
                    self.api.send_message(chat_id, report.text()).await?;
                }
            },
            None => {
                self.api.send_message(chat_id, report.text()).await?;
            }
        }

        if let Err(e) = self.api.delete_message(chat_id, processing_id).await {
            tracing::warn!("Failed to delete processing message: {}", e);
        }

        tracing::info!("Delivered analysis of {} to chat {}", request.address, chat_id);
        Ok(())
    }
}
