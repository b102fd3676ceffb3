mod handler;

pub use handler::{Route, UpdateHandler, route};

use crate::analysis::TokenAnalyzer;
use crate::config::BotConfig;
use anyhow::Result;
use bubblebot_telegram::BotApi;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Doubling delay between failed polls
#[derive(Debug)]
pub struct Backoff {
    current: Duration,
}

impl Backoff {
    pub fn new() -> Self {
        Self {
            current: INITIAL_BACKOFF,
        }
    }

    /// Delay to wait now; the following one doubles, capped at 30s
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(MAX_BACKOFF);
        delay
    }

    pub fn reset(&mut self) {
        self.current = INITIAL_BACKOFF;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

/// Long-polling Telegram bot
pub struct Bot {
    api: BotApi,
    handler: Arc<UpdateHandler>,
    poll_timeout: Duration,
}

impl Bot {
    pub fn new(api: BotApi, analyzer: Arc<TokenAnalyzer>, config: &BotConfig) -> Self {
        let handler = UpdateHandler::new(api.clone(), analyzer, config.max_concurrent_analyses);
        Self {
            api,
            handler: Arc::new(handler),
            poll_timeout: config.poll_timeout,
        }
    }

    /// Poll until Ctrl+C
    pub async fn run(self) -> Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl+C, shutting down...");
        })
        .await
    }

    /// Poll for updates until `shutdown` completes, then wait for running handlers
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut offset: Option<i64> = None;
        let mut backoff = Backoff::new();
        let mut tasks = JoinSet::new();

        tracing::info!("Polling for updates");

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                result = self.api.get_updates(offset, self.poll_timeout) => match result {
                    Ok(updates) => {
                        backoff.reset();
                        for update in updates {
                            offset = Some(update.update_id + 1);
                            let handler = Arc::clone(&self.handler);
                            tasks.spawn(async move {
                                let update_id = update.update_id;
                                if let Err(e) = handler.handle(update).await {
                                    tracing::error!("Failed to handle update {}: {:#}", update_id, e);
                                }
                            });
                        }
                    }
                    Err(e) => {
                        let delay = backoff.next_delay();
                        tracing::warn!("Polling failed: {}; retrying in {:?}", e, delay);
                        tokio::select! {
                            _ = &mut shutdown => break,
                            _ = tokio::time::sleep(delay) => {}
                        }
                    }
                }
            }

            while let Some(finished) = tasks.try_join_next() {
                if let Err(e) = finished {
                    tracing::error!("Update handler panicked: {}", e);
                }
            }
        }

        if !tasks.is_empty() {
            tracing::info!("Waiting for {} in-flight updates", tasks.len());
        }
        while let Some(finished) = tasks.join_next().await {
            if let Err(e) = finished {
                tracing::error!("Update handler panicked: {}", e);
            }
        }

        tracing::info!("Bot stopped");
        Ok(())
    }
}
