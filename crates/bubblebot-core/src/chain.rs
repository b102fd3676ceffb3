use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Blockchain networks covered by both Bubblemaps and CoinGecko
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[default]
    Eth,
    Bsc,
    Ftm,
    Avax,
    Poly,
    Arbi,
    Base,
}

impl Chain {
    pub const ALL: [Chain; 7] = [
        Chain::Eth,
        Chain::Bsc,
        Chain::Ftm,
        Chain::Avax,
        Chain::Poly,
        Chain::Arbi,
        Chain::Base,
    ];

    /// Keyword users type and Bubblemaps expects in URLs and queries
    pub fn keyword(&self) -> &'static str {
        match self {
            Chain::Eth => "eth",
            Chain::Bsc => "bsc",
            Chain::Ftm => "ftm",
            Chain::Avax => "avax",
            Chain::Poly => "poly",
            Chain::Arbi => "arbi",
            Chain::Base => "base",
        }
    }

    /// Asset platform id used by the CoinGecko contract endpoint
    pub fn coingecko_platform(&self) -> &'static str {
        match self {
            Chain::Eth => "ethereum",
            Chain::Bsc => "binance-smart-chain",
            Chain::Ftm => "fantom",
            Chain::Avax => "avalanche",
            Chain::Poly => "polygon-pos",
            Chain::Arbi => "arbitrum-one",
            Chain::Base => "base",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Chain::Eth => "Ethereum",
            Chain::Bsc => "BNB Smart Chain",
            Chain::Ftm => "Fantom",
            Chain::Avax => "Avalanche C-Chain",
            Chain::Poly => "Polygon",
            Chain::Arbi => "Arbitrum One",
            Chain::Base => "Base",
        }
    }

    /// Parse a chain keyword (case-insensitive)
    pub fn parse(keyword: &str) -> Result<Self> {
        let lower = keyword.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|chain| chain.keyword() == lower)
            .ok_or_else(|| Error::UnsupportedChain(keyword.to_string(), Self::supported_keywords()))
    }

    /// Comma separated list of every supported keyword
    pub fn supported_keywords() -> String {
        Self::ALL
            .iter()
            .map(|c| c.keyword())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Chain::parse(s)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Chain::parse("BSC").unwrap(), Chain::Bsc);
        assert_eq!(Chain::parse(" arbi ").unwrap(), Chain::Arbi);
        assert_eq!("poly".parse::<Chain>().unwrap(), Chain::Poly);
    }

    #[test]
    fn test_parse_unknown_lists_supported() {
        let err = Chain::parse("sol").unwrap_err().to_string();
        assert!(err.contains("'sol'"));
        assert!(err.contains("eth, bsc, ftm, avax, poly, arbi, base"));
    }

    #[test]
    fn test_coingecko_platforms() {
        assert_eq!(Chain::Eth.coingecko_platform(), "ethereum");
        assert_eq!(Chain::Bsc.coingecko_platform(), "binance-smart-chain");
        assert_eq!(Chain::Poly.coingecko_platform(), "polygon-pos");
        assert_eq!(Chain::Arbi.coingecko_platform(), "arbitrum-one");
        assert_eq!(Chain::Base.coingecko_platform(), "base");
    }

    #[test]
    fn test_default_is_eth() {
        assert_eq!(Chain::default(), Chain::Eth);
        assert_eq!(Chain::default().to_string(), "eth");
    }
}
