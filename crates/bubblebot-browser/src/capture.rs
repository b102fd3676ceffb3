use crate::{Error, Result, TempProfile};
use async_trait::async_trait;
use bubblebot_core::AnalysisRequest;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Element that appears once the bubble map has been drawn
pub const CANVAS_SELECTOR: &str = ".bubblemaps-canvas";

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How long Chrome gets to exit after a close request before it is killed
const EXIT_TIMEOUT: Duration = Duration::from_secs(5);

/// PNG image of a token's bubble map
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Screenshot {
    pub fn new(request: &AnalysisRequest, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("bubblemap_{}.png", request.address),
            bytes,
        }
    }

    /// Write the image into `dir`, returning the full path
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        tracing::info!("Screenshot saved to {}", path.display());
        Ok(path)
    }
}

/// Anything that can produce a bubble map image for a token
#[async_trait]
pub trait MapCapture: Send + Sync {
    async fn capture(&self, request: &AnalysisRequest) -> Result<Screenshot>;
}

/// Settings for headless Chrome captures
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    pub chrome_path: PathBuf,
    /// Bubblemaps web app base URL
    pub app_url: String,
    /// How long to wait for the map canvas to appear
    pub selector_timeout: Duration,
    /// Extra time given to the map to finish rendering
    pub render_delay: Duration,
    pub window_width: u32,
    pub window_height: u32,
}

impl CaptureSettings {
    pub fn new(chrome_path: PathBuf, app_url: impl Into<String>) -> Self {
        Self {
            chrome_path,
            app_url: app_url.into(),
            selector_timeout: Duration::from_secs(10),
            render_delay: Duration::from_secs(5),
            window_width: 1920,
            window_height: 1080,
        }
    }

    /// Flags passed to Chrome in addition to chromiumoxide's defaults
    fn extra_args(&self) -> Vec<String> {
        vec![
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
            "--hide-scrollbars".to_string(),
        ]
    }
}

/// Captures bubble maps by driving a fresh headless Chrome per request
pub struct BubblemapCapture {
    settings: CaptureSettings,
}

impl BubblemapCapture {
    pub fn new(settings: CaptureSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self, profile: &TempProfile) -> Result<BrowserConfig> {
        let settings = &self.settings;
        BrowserConfig::builder()
            .chrome_executable(&settings.chrome_path)
            .user_data_dir(profile.path())
            .no_sandbox()
            .window_size(settings.window_width, settings.window_height)
            .viewport(Viewport {
                width: settings.window_width,
                height: settings.window_height,
                ..Default::default()
            })
            .args(settings.extra_args())
            .build()
            .map_err(|e| Error::Launch(format!("invalid browser configuration: {}", e)))
    }

    /// Load the token page and take the screenshot
    async fn screenshot_page(&self, browser: &Browser, request: &AnalysisRequest) -> Result<Vec<u8>> {
        let url = request.bubblemaps_url(&self.settings.app_url);
        tracing::info!("Loading URL: {}", url);
        let page = browser.new_page(url.as_str()).await?;

        tracing::debug!("Waiting for {} to render...", CANVAS_SELECTOR);
        match tokio::time::timeout(self.settings.selector_timeout, wait_for_element(&page)).await {
            Ok(()) => tokio::time::sleep(self.settings.render_delay).await,
            Err(_) => tracing::warn!(
                "Timeout waiting for {} after {:?}, capturing anyway",
                CANVAS_SELECTOR,
                self.settings.selector_timeout
            ),
        }

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let bytes = page.screenshot(params).await?;
        tracing::debug!("Captured {} bytes", bytes.len());

        Ok(bytes)
    }
}

#[async_trait]
impl MapCapture for BubblemapCapture {
    async fn capture(&self, request: &AnalysisRequest) -> Result<Screenshot> {
        tracing::info!("Starting screenshot capture for {}", request.address);

        let profile = TempProfile::new()?;
        let config = self.browser_config(&profile)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| Error::Launch(e.to_string()))?;

        // The handler drives the CDP connection; it must be polled for any command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let result = self.screenshot_page(&browser, request).await;

        shut_down(&mut browser, EXIT_TIMEOUT).await;
        handler_task.abort();

        match result {
            Ok(bytes) => {
                tracing::info!("Screenshot captured for {}", request.address);
                Ok(Screenshot::new(request, bytes))
            }
            Err(e) => {
                tracing::error!("Error during screenshot capture: {}", e);
                Err(e)
            }
        }
    }
}

/// Process-level control over a launched browser
#[async_trait]
trait ChromeProcess: Send {
    async fn request_close(&mut self) -> Result<()>;
    async fn wait_exit(&mut self) -> Result<()>;
    async fn force_kill(&mut self) -> Result<()>;
}

#[async_trait]
impl ChromeProcess for Browser {
    async fn request_close(&mut self) -> Result<()> {
        self.close().await?;
        Ok(())
    }

    async fn wait_exit(&mut self) -> Result<()> {
        self.wait().await?;
        Ok(())
    }

    async fn force_kill(&mut self) -> Result<()> {
        match self.kill().await {
            Some(result) => Ok(result?),
            None => Ok(()),
        }
    }
}

/// Close Chrome, killing it when it refuses to close or does not exit in time
///
/// Never waits on a process that was not asked to close successfully.
async fn shut_down<P: ChromeProcess + ?Sized>(chrome: &mut P, exit_timeout: Duration) {
    if let Err(e) = chrome.request_close().await {
        tracing::warn!("Failed to close Chrome cleanly: {}; killing it", e);
        kill(chrome).await;
        return;
    }

    match tokio::time::timeout(exit_timeout, chrome.wait_exit()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::debug!("Failed waiting for Chrome to exit: {}", e),
        Err(_) => {
            tracing::warn!("Chrome did not exit within {:?}; killing it", exit_timeout);
            kill(chrome).await;
        }
    }
}

async fn kill<P: ChromeProcess + ?Sized>(chrome: &mut P) {
    if let Err(e) = chrome.force_kill().await {
        tracing::error!("Failed to kill Chrome: {}", e);
    }
}

/// Poll the page until the map canvas exists
async fn wait_for_element(page: &Page) {
    loop {
        if page.find_element(CANVAS_SELECTOR).await.is_ok() {
            return;
        }
        tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
    }
}
