use crate::OutputFormat;
use anyhow::Result;
use bubblebot_core::Chain;

#[derive(Debug, Clone, serde::Serialize)]
pub struct ChainInfo {
    pub keyword: &'static str,
    pub name: &'static str,
    pub coingecko_platform: &'static str,
}

/// Every supported chain, in the order users see them
pub fn supported_chains() -> Vec<ChainInfo> {
    Chain::ALL
        .iter()
        .map(|chain| ChainInfo {
            keyword: chain.keyword(),
            name: chain.display_name(),
            coingecko_platform: chain.coingecko_platform(),
        })
        .collect()
}

pub fn execute(format: OutputFormat) -> Result<()> {
    let chains = supported_chains();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&chains)?),
        OutputFormat::Pretty => {
            use console::style;

            println!("{}", style("Supported chains").bold().cyan());
            for chain in &chains {
                println!(
                    "  {:<6} {:<20} {}",
                    style(chain.keyword).green().bold(),
                    chain.name,
                    style(chain.coingecko_platform).dim()
                );
            }
            println!();
            println!("Default chain: {}", Chain::default());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_chains_lists_all() {
        let chains = supported_chains();
        assert_eq!(chains.len(), 7);
        assert_eq!(chains[0].keyword, "eth");
        assert!(chains.iter().any(|c| c.coingecko_platform == "avalanche"));
    }
}
