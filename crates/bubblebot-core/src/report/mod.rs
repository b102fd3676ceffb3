mod format;

pub use format::{
    format_amount, format_change, format_count, format_grouped, format_last_update,
    format_percent, format_price, format_usd, shorten_address,
};

use crate::{Analysis, Holder};

/// Telegram limit for photo captions
pub const CAPTION_LIMIT: usize = 1024;

pub const WELCOME_MESSAGE: &str = "👋 Welcome to the Bubblemaps Bot!\n\n\
    Send me a token contract address and I'll analyze:\n\
    - Token distribution visualization\n\
    - Market data (price, volume, market cap)\n\
    - Decentralization metrics\n\
    - Top holder analysis\n\n\
    Example: 0x... eth (or bsc, ftm, avax, etc)";

pub const PROCESSING_MESSAGE: &str = "🔍 Analyzing token... Please wait.";

pub const NOT_FOUND_MESSAGE: &str =
    "❌ Invalid contract address or token not found on Bubblemaps.";

pub const FAILURE_MESSAGE: &str =
    "❌ An error occurred while processing your request. Please try again later.";

/// Human readable analysis, as sent to chat users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    text: String,
}

impl Report {
    /// Render an analysis; `app_url` is the Bubblemaps web app base URL
    pub fn render(analysis: &Analysis, app_url: &str) -> Self {
        let token = &analysis.token;
        let market = &analysis.market;

        let mut text = format!(
            "📊 {} Analysis for {} ({})\n\n\
             💰 Market Cap: {}\n\
             💵 Price: {}\n\
             📈 24h Volume: {}\n\
             📊 24h Change: {}\n\n",
            token.kind(),
            token.full_name.as_deref().unwrap_or("Unknown"),
            token.symbol.as_deref().unwrap_or("N/A"),
            format_usd(market.market_cap),
            format_price(market.price),
            format_usd(market.volume_24h),
            format_change(market.price_change_24h),
        );

        text.push_str(&format!(
            "🎯 Decentralization Metrics:\n\
             └ Score: {}/100\n\
             └ Total Holders: {}\n\
             └ Whale Holders: {}\n\
             └ CEX Holdings: {}\n\
             └ Contract Holdings: {}\n\
             └ Transaction Flow: {}\n\
             └ Last Update: {}\n\n",
            token.decentralization_score,
            format_count(token.holder_count),
            token.whale_count,
            format_percent(token.percent_in_cexs),
            format_percent(token.percent_in_contracts),
            format_amount(token.total_flow),
            format_last_update(token.last_update.as_deref()),
        ));

        text.push_str("Top 5 Holders:\n");
        for (idx, holder) in token.top_holders.iter().enumerate() {
            text.push_str(&holder_block(idx + 1, holder));
        }

        text.push_str(&format!(
            "\n🔗 View on Bubblemaps: {}",
            analysis.request.bubblemaps_url(app_url)
        ));

        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The report as a photo caption, or `None` when it is too long to be one
    pub fn as_caption(&self) -> Option<&str> {
        // Telegram measures captions in UTF-16 code units
        if self.text.encode_utf16().count() <= CAPTION_LIMIT {
            Some(&self.text)
        } else {
            None
        }
    }
}

fn holder_block(rank: usize, holder: &Holder) -> String {
    let marker = if holder.is_contract { "📜" } else { "👤" };
    format!(
        "{}. {} {}\n   └ {}\n   └ {:.2}% ({} tokens)\n",
        rank,
        marker,
        holder.name,
        shorten_address(&holder.address),
        holder.percentage,
        format_amount(holder.amount),
    )
}
