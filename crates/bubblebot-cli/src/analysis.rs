use crate::config::{BrowserArgs, SourceArgs};
use anyhow::Result;
use bubblebot_browser::{BubblemapCapture, CaptureSettings, ChromeFinder, MapCapture, Screenshot};
use bubblebot_core::{Analysis, AnalysisRequest, Report};
use bubblebot_sources::{BubblemapsClient, CoinGeckoClient, build_http_client};
use std::sync::Arc;
use std::time::Duration;

/// Runs the data sources and the bubble map capture for one request
pub struct TokenAnalyzer {
    bubblemaps: BubblemapsClient,
    coingecko: CoinGeckoClient,
    capture: Option<Arc<dyn MapCapture>>,
    app_url: String,
}

impl TokenAnalyzer {
    pub fn new(bubblemaps: BubblemapsClient, coingecko: CoinGeckoClient, app_url: impl Into<String>) -> Self {
        Self {
            bubblemaps,
            coingecko,
            capture: None,
            app_url: app_url.into(),
        }
    }

    pub fn with_capture(mut self, capture: Arc<dyn MapCapture>) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Build an analyzer from command line settings
    ///
    /// When `screenshots` is set but Chrome cannot be found, the analyzer is
    /// built without captures and a warning is logged.
    pub fn from_args(sources: &SourceArgs, browser: &BrowserArgs, screenshots: bool) -> Result<Self> {
        let http = build_http_client(sources.http_timeout())?;
        let analyzer = Self::new(
            BubblemapsClient::new(http.clone(), sources.bubblemaps_api_url.clone()),
            CoinGeckoClient::new(
                http,
                sources.coingecko_api_url.clone(),
                sources.coingecko_api_key.clone(),
            ),
            sources.bubblemaps_app_url.clone(),
        );

        if !screenshots {
            return Ok(analyzer);
        }

        match ChromeFinder::new(browser.chrome_path.clone()).find() {
            Ok(chrome) => {
                tracing::info!("Using Chrome at {}", chrome.display());
                let mut settings = CaptureSettings::new(chrome, sources.bubblemaps_app_url.clone());
                settings.selector_timeout = Duration::from_secs(browser.capture_timeout_secs);
                settings.render_delay = Duration::from_secs(browser.render_delay_secs);
                Ok(analyzer.with_capture(Arc::new(BubblemapCapture::new(settings))))
            }
            Err(e) => {
                tracing::warn!("{}; bubble map screenshots are disabled", e);
                Ok(analyzer)
            }
        }
    }

    pub fn has_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Fetch distribution and market data concurrently
    ///
    /// Returns `None` when Bubblemaps has no data for the token.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Option<Analysis>> {
        tracing::info!("Analyzing {} on {}", request.address, request.chain);

        let (token, market) = tokio::join!(
            self.bubblemaps.token_info(request),
            self.coingecko.market_data(request)
        );

        let Some(token) = token? else {
            tracing::info!("Token {} not found on Bubblemaps", request.address);
            return Ok(None);
        };
        if market.is_empty() {
            tracing::warn!(
                "No market data for {} on {}; report will show N/A",
                request.address,
                request.chain
            );
        }

        Ok(Some(Analysis::new(request.clone(), token, market)))
    }

    /// Capture the bubble map, if captures are enabled
    pub async fn capture(&self, request: &AnalysisRequest) -> Result<Option<Screenshot>> {
        match &self.capture {
            Some(capture) => Ok(Some(capture.capture(request).await?)),
            None => Ok(None),
        }
    }

    pub fn report(&self, analysis: &Analysis) -> Report {
        Report::render(analysis, &self.app_url)
    }
}
