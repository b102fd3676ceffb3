// Upstream data sources for token analysis

pub mod bubblemaps;
pub mod client;
pub mod coingecko;
pub mod error;

pub use bubblemaps::BubblemapsClient;
pub use client::build_http_client;
pub use coingecko::CoinGeckoClient;
pub use error::{Error, Result};
