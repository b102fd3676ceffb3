use crate::client::join_url;
use crate::Result;
use bubblebot_core::{AnalysisRequest, MarketData};
use reqwest::StatusCode;
use serde::Deserialize;

const DEMO_KEY_HEADER: &str = "x-cg-demo-api-key";
const PRO_KEY_HEADER: &str = "x-cg-pro-api-key";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CoinResponse {
    market_data: Option<CoinMarketData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CoinMarketData {
    current_price: Option<UsdQuote>,
    market_cap: Option<UsdQuote>,
    total_volume: Option<UsdQuote>,
    price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UsdQuote {
    usd: Option<f64>,
}

impl From<CoinMarketData> for MarketData {
    fn from(data: CoinMarketData) -> Self {
        let usd = |quote: Option<UsdQuote>| quote.and_then(|q| q.usd);
        MarketData {
            price: usd(data.current_price),
            market_cap: usd(data.market_cap),
            volume_24h: usd(data.total_volume),
            price_change_24h: data.price_change_percentage_24h,
        }
    }
}

/// CoinGecko market data client
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    pub fn new(http: reqwest::Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_key,
        }
    }

    /// Market data for a token contract
    ///
    /// Market data is optional for an analysis, so failures are logged and
    /// reported as empty data rather than errors.
    pub async fn market_data(&self, request: &AnalysisRequest) -> MarketData {
        match self.try_market_data(request).await {
            Ok(Some(data)) => data,
            Ok(None) => MarketData::default(),
            Err(e) => {
                tracing::error!("Failed to fetch market data: {}", e);
                MarketData::default()
            }
        }
    }

    async fn try_market_data(&self, request: &AnalysisRequest) -> Result<Option<MarketData>> {
        let url = join_url(
            &self.api_url,
            &format!(
                "coins/{}/contract/{}",
                request.chain.coingecko_platform(),
                request.address
            ),
        );
        tracing::debug!("CoinGecko request: {}", url);

        let mut builder = self.http.get(&url);
        if let Some(key) = &self.api_key {
            builder = builder.header(self.key_header(), key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!("CoinGecko API error: {}", status);
            return Ok(None);
        }

        let coin: CoinResponse = response.json().await?;
        Ok(Some(coin.market_data.map(MarketData::from).unwrap_or_default()))
    }

    fn key_header(&self) -> &'static str {
        if self.api_url.contains("pro-api.coingecko.com") {
            PRO_KEY_HEADER
        } else {
            DEMO_KEY_HEADER
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubblebot_core::Chain;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ADDRESS: &str = "0x95ad61b0a150d79219dcf64e1e6cc01f0b64c4ce";

    fn request(chain: Chain) -> AnalysisRequest {
        AnalysisRequest::new(ADDRESS, chain).unwrap()
    }

    #[tokio::test]
    async fn test_market_data_reads_usd_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/coins/polygon-pos/contract/{}", ADDRESS)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "shiba-inu",
                "market_data": {
                    "current_price": {"usd": 0.00002345, "eur": 0.00002},
                    "market_cap": {"usd": 13800000000.0},
                    "total_volume": {"usd": 250000000.5},
                    "price_change_percentage_24h": -2.75
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(reqwest::Client::new(), server.uri(), None);
        let data = client.market_data(&request(Chain::Poly)).await;

        assert_eq!(data.price, Some(0.00002345));
        assert_eq!(data.market_cap, Some(13_800_000_000.0));
        assert_eq!(data.volume_24h, Some(250_000_000.5));
        assert_eq!(data.price_change_24h, Some(-2.75));
    }

    #[tokio::test]
    async fn test_market_data_empty_on_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(reqwest::Client::new(), server.uri(), None);
        assert!(client.market_data(&request(Chain::Eth)).await.is_empty());
    }

    #[tokio::test]
    async fn test_market_data_empty_on_bad_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(reqwest::Client::new(), server.uri(), None);
        assert!(client.market_data(&request(Chain::Eth)).await.is_empty());
    }

    #[tokio::test]
    async fn test_market_data_without_market_section() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(reqwest::Client::new(), server.uri(), None);
        assert!(client.market_data(&request(Chain::Eth)).await.is_empty());
    }

    #[tokio::test]
    async fn test_market_data_sends_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header(DEMO_KEY_HEADER, "demo-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "market_data": {"current_price": {"usd": 1.0}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CoinGeckoClient::new(
            reqwest::Client::new(),
            server.uri(),
            Some("demo-key".to_string()),
        );
        let data = client.market_data(&request(Chain::Base)).await;
        assert_eq!(data.price, Some(1.0));
        assert_eq!(data.market_cap, None);
    }
}
