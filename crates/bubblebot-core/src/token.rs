use crate::AnalysisRequest;
use serde::{Deserialize, Serialize};

/// USD market figures for a token; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub price_change_24h: Option<f64>,
}

impl MarketData {
    /// True when no figure is known
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.market_cap.is_none()
            && self.volume_24h.is_none()
            && self.price_change_24h.is_none()
    }
}

/// One address in the holder distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    pub address: String,
    /// Share of total supply, in percent
    pub percentage: f64,
    pub amount: f64,
    pub is_contract: bool,
    pub name: String,
}

/// Token metadata and holder distribution metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub full_name: Option<String>,
    pub symbol: Option<String>,
    pub is_nft: bool,
    pub top_holders: Vec<Holder>,
    pub holder_count: usize,
    pub whale_count: usize,
    pub total_flow: f64,
    /// Score computed from the distribution, 0-100
    pub decentralization_score: u8,
    /// Score as published by Bubblemaps, if any
    pub reported_score: Option<f64>,
    pub percent_in_cexs: Option<f64>,
    pub percent_in_contracts: Option<f64>,
    pub last_update: Option<String>,
}

impl TokenInfo {
    pub fn kind(&self) -> &'static str {
        if self.is_nft { "NFT Collection" } else { "Token" }
    }
}

/// Everything known about a token after one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub request: AnalysisRequest,
    pub token: TokenInfo,
    pub market: MarketData,
}

impl Analysis {
    pub fn new(request: AnalysisRequest, token: TokenInfo, market: MarketData) -> Self {
        Self {
            request,
            token,
            market,
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
