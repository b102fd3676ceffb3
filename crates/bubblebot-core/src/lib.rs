pub mod chain;
pub mod error;
pub mod metrics;
pub mod report;
pub mod request;
pub mod token;

pub use chain::Chain;
pub use error::{Error, Result};
pub use report::Report;
pub use request::{AnalysisRequest, RequestError, parse_request};
pub use token::{Analysis, Holder, MarketData, TokenInfo};
