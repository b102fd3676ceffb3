use crate::Chain;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Usage hint appended to every rejected request
pub const USAGE: &str = "Format: <contract_address> <chain>";

lazy_static! {
    static ref ADDRESS_PATTERN: Regex = Regex::new(r"^0x[0-9a-f]{40}$").unwrap();
}

/// A validated request to analyze one token contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub address: String,
    pub chain: Chain,
}

impl AnalysisRequest {
    /// Build a request from a raw address, normalizing it to lowercase
    pub fn new(address: &str, chain: Chain) -> Result<Self, RequestError> {
        let address = address.trim().to_lowercase();
        if !ADDRESS_PATTERN.is_match(&address) {
            return Err(RequestError::InvalidAddress(address));
        }
        Ok(Self { address, chain })
    }

    /// Public bubble map page for this token
    pub fn bubblemaps_url(&self, app_url: &str) -> String {
        format!(
            "{}/{}/token/{}",
            app_url.trim_end_matches('/'),
            self.chain.keyword(),
            self.address
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("No contract address provided")]
    Empty,

    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),
}

impl RequestError {
    /// Message shown to the user who sent the request
    pub fn reply_text(&self) -> String {
        match self {
            RequestError::Empty => {
                format!("❌ Please provide a valid contract address.\n{}", USAGE)
            }
            RequestError::InvalidAddress(_) => {
                format!("❌ Invalid contract address format.\n{}", USAGE)
            }
            RequestError::UnsupportedChain(chain) => format!(
                "❌ Unsupported chain '{}'.\nSupported chains: {}",
                chain,
                Chain::supported_keywords()
            ),
        }
    }
}

/// Parse a free-form message of the form `<contract_address> [chain]`
///
/// Tokens past the second are ignored. The chain defaults to Ethereum.
pub fn parse_request(text: &str) -> Result<AnalysisRequest, RequestError> {
    let mut parts = text.split_whitespace();

    let address = parts.next().ok_or(RequestError::Empty)?;
    let chain = match parts.next() {
        Some(keyword) => Chain::parse(keyword)
            .map_err(|_| RequestError::UnsupportedChain(keyword.to_lowercase()))?,
        None => Chain::default(),
    };

    AnalysisRequest::new(address, chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce";

    #[test]
    fn test_parse_address_only_defaults_to_eth() {
        let request = parse_request(ADDRESS).unwrap();
        assert_eq!(request.address, ADDRESS);
        assert_eq!(request.chain, Chain::Eth);
    }

    #[test]
    fn test_parse_lowercases_address_and_chain() {
        let text = format!("  {}   BSC extra words", ADDRESS.to_uppercase().replace("0X", "0x"));
        let request = parse_request(&text).unwrap();
        assert_eq!(request.address, ADDRESS);
        assert_eq!(request.chain, Chain::Bsc);
    }

    #[test]
    fn test_parse_empty_message() {
        assert_eq!(parse_request("   ").unwrap_err(), RequestError::Empty);
    }

    #[test]
    fn test_parse_rejects_bad_addresses() {
        for bad in [
            "hello",
            "0x1234",
            "95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce00",
            "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4cz",
            "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce1",
        ] {
            assert!(
                matches!(parse_request(bad), Err(RequestError::InvalidAddress(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_unknown_chain() {
        let err = parse_request(&format!("{} SOL", ADDRESS)).unwrap_err();
        assert_eq!(err, RequestError::UnsupportedChain("sol".to_string()));
        assert!(err.reply_text().contains("Supported chains: eth, bsc"));
    }

    #[test]
    fn test_reply_text_includes_usage() {
        assert!(RequestError::Empty.reply_text().ends_with(USAGE));
        let invalid = RequestError::InvalidAddress("0x1".to_string()).reply_text();
        assert!(invalid.starts_with("❌ Invalid contract address format."));
        assert!(invalid.ends_with(USAGE));
    }

    #[test]
    fn test_bubblemaps_url() {
        let request = AnalysisRequest::new(ADDRESS, Chain::Base).unwrap();
        assert_eq!(
            request.bubblemaps_url("https://app.bubblemaps.io/"),
            format!("https://app.bubblemaps.io/base/token/{}", ADDRESS)
        );
    }
}
