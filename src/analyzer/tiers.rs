use crate::utils::round2;
use serde::Serialize;

/// Percentile-based suggested price tiers.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestedPricePoints {
    pub economy: f64,
    pub standard: f64,
    pub premium: f64,
}

pub struct TierRecommender;

impl TierRecommender {
    /// Suggests economy/standard/premium tiers as the values at the
    /// 25th/50th/75th percentile indices of the ascending-sorted, non-empty
    /// price list. With a single submission all three tiers collapse to it.
    pub fn recommend(prices: &[f64]) -> SuggestedPricePoints {
        let mut sorted = prices.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let quantile_index = |fraction: f64| (sorted.len() as f64 * fraction).floor() as usize;

        SuggestedPricePoints {
            economy: round2(sorted[quantile_index(0.25)]),
            standard: round2(sorted[quantile_index(0.5)]),
            premium: round2(sorted[quantile_index(0.75)]),
        }
    }
}
