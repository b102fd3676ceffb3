use crate::Holder;
use std::cmp::Ordering;

/// Number of holders listed in a report
pub const TOP_HOLDER_LIMIT: usize = 5;

/// Holders owning more than this share of supply (percent) are whales
pub const WHALE_THRESHOLD: f64 = 1.0;

/// Aggregate figures derived from a holder distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionMetrics {
    pub holder_count: usize,
    pub whale_count: usize,
    pub total_flow: f64,
    pub decentralization_score: u8,
}

impl DistributionMetrics {
    /// Compute metrics for a distribution
    ///
    /// `total_flow` is the summed transfer volume between holders and
    /// `percent_in_contracts` the share of supply held by smart contracts.
    pub fn compute(holders: &[Holder], total_flow: f64, percent_in_contracts: Option<f64>) -> Self {
        let holder_count = holders.len();
        let whale_count = holders
            .iter()
            .filter(|h| h.percentage > WHALE_THRESHOLD)
            .count();
        let top_share = holders
            .iter()
            .map(|h| h.percentage)
            .fold(0.0_f64, f64::max);

        let metrics = Self {
            holder_count,
            whale_count,
            total_flow,
            decentralization_score: decentralization_score(
                top_share,
                holder_count,
                percent_in_contracts.unwrap_or(0.0),
            ),
        };

        tracing::debug!(
            "Distribution metrics: {} holders, {} whales, score {}",
            metrics.holder_count,
            metrics.whale_count,
            metrics.decentralization_score
        );

        metrics
    }
}

/// Score how evenly a token is distributed, from 0 (concentrated) to 100
///
/// Up to 50 points for a small largest holder, up to 30 for the number of
/// holders and up to 20 for little supply locked in contracts.
pub fn decentralization_score(top_share: f64, holder_count: usize, percent_in_contracts: f64) -> u8 {
    let distribution = (50.0 - top_share / 2.0).max(0.0);
    let breadth = (holder_count as f64 / 5.0).min(30.0);
    let contracts = (20.0 - percent_in_contracts / 5.0).max(0.0);

    let score = (distribution + breadth + contracts).round_ties_even();
    score.clamp(0.0, 100.0) as u8
}

/// Sum the forward and backward volume of every link
pub fn total_flow<I>(links: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    links
        .into_iter()
        .map(|(forward, backward)| forward + backward)
        .sum()
}

/// Largest holders first, limited to [`TOP_HOLDER_LIMIT`]
pub fn top_holders(holders: &[Holder]) -> Vec<Holder> {
    let mut sorted = holders.to_vec();
    sorted.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(Ordering::Equal)
    });
    sorted.truncate(TOP_HOLDER_LIMIT);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(percentage: f64) -> Holder {
        Holder {
            address: format!("0x{:040}", (percentage * 100.0) as u64),
            percentage,
            amount: percentage * 1_000.0,
            is_contract: false,
            name: "Unknown".to_string(),
        }
    }

    #[test]
    fn test_score_components() {
        // 50 - 10/2 = 45, 100/5 = 20, 20 - 10/5 = 18
        assert_eq!(decentralization_score(10.0, 100, 10.0), 83);
    }

    #[test]
    fn test_score_caps_each_component() {
        assert_eq!(decentralization_score(0.0, 10_000, 0.0), 100);
        assert_eq!(decentralization_score(150.0, 0, 150.0), 0);
    }

    #[test]
    fn test_score_rounds_half_to_even() {
        // 50 - 1/2 = 49.5, no holders, no contracts = 69.5 -> 70
        assert_eq!(decentralization_score(1.0, 0, 0.0), 70);
        // 50 - 3/2 = 48.5, 0, 20 = 68.5 -> 68
        assert_eq!(decentralization_score(3.0, 0, 0.0), 68);
    }

    #[test]
    fn test_compute_counts_whales_and_uses_largest_share() {
        let holders = vec![holder(0.5), holder(40.0), holder(1.0), holder(2.5)];
        let metrics = DistributionMetrics::compute(&holders, 12.5, None);

        assert_eq!(metrics.holder_count, 4);
        assert_eq!(metrics.whale_count, 2);
        assert_eq!(metrics.total_flow, 12.5);
        // 50 - 20 = 30, 4/5 = 0.8, 20 => 50.8 -> 51
        assert_eq!(metrics.decentralization_score, 51);
    }

    #[test]
    fn test_compute_without_holders() {
        let metrics = DistributionMetrics::compute(&[], 0.0, Some(100.0));
        assert_eq!(metrics.holder_count, 0);
        assert_eq!(metrics.whale_count, 0);
        assert_eq!(metrics.decentralization_score, 50);
    }

    #[test]
    fn test_total_flow_sums_both_directions() {
        assert_eq!(total_flow(vec![(1.0, 2.0), (3.5, 0.5)]), 7.0);
        assert_eq!(total_flow(Vec::new()), 0.0);
    }

    #[test]
    fn test_top_holders_sorted_and_limited() {
        let holders: Vec<Holder> = [3.0, 9.0, 1.0, 7.0, 5.0, 8.0, 2.0]
            .into_iter()
            .map(holder)
            .collect();
        let top = top_holders(&holders);
        let shares: Vec<f64> = top.iter().map(|h| h.percentage).collect();
        assert_eq!(shares, vec![9.0, 8.0, 7.0, 5.0, 3.0]);
    }
}
