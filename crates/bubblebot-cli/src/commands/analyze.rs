use crate::OutputFormat;
use crate::analysis::TokenAnalyzer;
use crate::config::{BrowserArgs, SourceArgs};
use anyhow::{Result, anyhow};
use bubblebot_core::{AnalysisRequest, Chain};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Options of the one-shot `analyze` command
pub struct AnalyzeOptions<'a> {
    pub address: &'a str,
    pub chain: &'a str,
    /// Capture the bubble map into this directory; no capture when unset
    pub screenshot_dir: Option<&'a Path>,
    pub format: OutputFormat,
}

/// Build the request the same way chat messages are validated
pub fn build_request(address: &str, chain: &str) -> Result<AnalysisRequest> {
    let chain = Chain::parse(chain)?;
    AnalysisRequest::new(address, chain).map_err(|e| anyhow!("{}", e.reply_text()))
}

pub fn execute(options: AnalyzeOptions<'_>, sources: &SourceArgs, browser: &BrowserArgs) -> Result<()> {
    let request = build_request(options.address, options.chain)?;
    sources.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let analyzer = TokenAnalyzer::from_args(sources, browser, options.screenshot_dir.is_some())?;

        let spinner = spinner(options.format);
        spinner.set_message(format!("Analyzing {} on {}...", request.address, request.chain));

        let analysis = match analyzer.analyze(&request).await {
            Ok(Some(analysis)) => analysis,
            Ok(None) => {
                spinner.finish_and_clear();
                return Err(anyhow!(
                    "Token {} not found on Bubblemaps ({})",
                    request.address,
                    request.chain
                ));
            }
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e);
            }
        };

        if analyzer.has_capture() {
            spinner.set_message("Capturing bubble map...");
        }
        let screenshot = analyzer.capture(&request).await;
        spinner.finish_and_clear();

        let saved = match (screenshot, options.screenshot_dir) {
            (Ok(Some(shot)), Some(dir)) => Some(shot.save_to(dir)?),
            (Ok(_), _) => None,
            (Err(e), _) => {
                tracing::warn!("Bubble map capture failed: {:#}", e);
                None
            }
        };

        match options.format {
            OutputFormat::Json => println!("{}", analysis.to_json()?),
            OutputFormat::Pretty => {
                use console::style;

                println!("{}", analyzer.report(&analysis).text());
                if let Some(path) = saved {
                    println!();
                    println!("{} {}", style("Bubble map:").bold(), path.display());
                }
            }
        }

        Ok(())
    })
}

fn spinner(format: OutputFormat) -> ProgressBar {
    // JSON output stays machine readable
    if format == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
