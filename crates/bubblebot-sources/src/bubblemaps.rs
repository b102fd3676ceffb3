//! Client for the Bubblemaps legacy map API.
//!
//! A token is analyzed from two documents:
//! - `map-metadata`: decentralisation score, identified supply, update time
//! - `map-data`: token name, holder nodes and the transfer links between them
//!
//! Both must be available for a token to count as found.

use crate::client::join_url;
use crate::Result;
use bubblebot_core::metrics::{self, DistributionMetrics};
use bubblebot_core::{AnalysisRequest, Holder, TokenInfo};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

const STATUS_OK: &str = "OK";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MapMetadata {
    status: Option<String>,
    decentralisation_score: Option<f64>,
    identified_supply: Option<IdentifiedSupply>,
    dt_update: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct IdentifiedSupply {
    percent_in_cexs: Option<f64>,
    percent_in_contracts: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MapData {
    status: Option<String>,
    full_name: Option<String>,
    symbol: Option<String>,
    #[serde(alias = "is_X721")]
    is_nft: bool,
    dt_update: Option<String>,
    nodes: Vec<MapNode>,
    links: Vec<MapLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MapNode {
    address: String,
    amount: f64,
    is_contract: bool,
    name: Option<String>,
    percentage: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MapLink {
    forward: f64,
    backward: f64,
}

impl From<MapNode> for Holder {
    fn from(node: MapNode) -> Self {
        Holder {
            address: node.address,
            percentage: node.percentage,
            amount: node.amount,
            is_contract: node.is_contract,
            name: node
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Bubblemaps API client
#[derive(Debug, Clone)]
pub struct BubblemapsClient {
    http: reqwest::Client,
    api_url: String,
}

impl BubblemapsClient {
    pub fn new(http: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// Fetch distribution data for a token
    ///
    /// Returns `Ok(None)` when Bubblemaps does not know the token or answers
    /// with an error status.
    pub async fn token_info(&self, request: &AnalysisRequest) -> Result<Option<TokenInfo>> {
        let Some(metadata) = self.fetch::<MapMetadata>("map-metadata", request).await? else {
            return Ok(None);
        };
        if metadata.status.as_deref() != Some(STATUS_OK) {
            tracing::error!(
                "Invalid metadata response for {} on {}: status {:?}",
                request.address,
                request.chain,
                metadata.status
            );
            return Ok(None);
        }

        let Some(data) = self.fetch::<MapData>("map-data", request).await? else {
            return Ok(None);
        };
        if let Some(status) = data.status.as_deref()
            && status != STATUS_OK
        {
            tracing::error!(
                "Invalid token data response for {} on {}: status {}",
                request.address,
                request.chain,
                status
            );
            return Ok(None);
        }

        let info = build_token_info(metadata, data);
        tracing::info!(
            "Bubblemaps: {} ({}) has {} holders",
            info.full_name.as_deref().unwrap_or("unknown token"),
            request.chain,
            info.holder_count
        );

        Ok(Some(info))
    }

    /// GET a map endpoint, returning `None` for any non-200 status
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: &AnalysisRequest,
    ) -> Result<Option<T>> {
        let url = self.endpoint_url(endpoint, request)?;
        tracing::debug!("Bubblemaps request: {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!("Bubblemaps {} API error: {}", endpoint, status);
            return Ok(None);
        }

        Ok(Some(response.json::<T>().await?))
    }

    fn endpoint_url(&self, endpoint: &str, request: &AnalysisRequest) -> Result<Url> {
        let url = Url::parse_with_params(
            &join_url(&self.api_url, endpoint),
            &[
                ("token", request.address.as_str()),
                ("chain", request.chain.keyword()),
            ],
        )?;
        Ok(url)
    }
}

fn build_token_info(metadata: MapMetadata, data: MapData) -> TokenInfo {
    let supply = metadata.identified_supply.unwrap_or_default();
    let holders: Vec<Holder> = data.nodes.into_iter().map(Holder::from).collect();
    let flow = metrics::total_flow(data.links.iter().map(|l| (l.forward, l.backward)));
    let distribution = DistributionMetrics::compute(&holders, flow, supply.percent_in_contracts);

    TokenInfo {
        full_name: data.full_name,
        symbol: data.symbol,
        is_nft: data.is_nft,
        top_holders: metrics::top_holders(&holders),
        holder_count: distribution.holder_count,
        whale_count: distribution.whale_count,
        total_flow: distribution.total_flow,
        decentralization_score: distribution.decentralization_score,
        reported_score: metadata.decentralisation_score,
        percent_in_cexs: supply.percent_in_cexs,
        percent_in_contracts: supply.percent_in_contracts,
        last_update: metadata.dt_update.or(data.dt_update),
    }
}
