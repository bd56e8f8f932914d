use crate::utils::round2;
use serde::Serialize;

/// Central-tendency figures for a set of submitted prices.
#[derive(Debug, Clone)]
pub struct PriceStatistics {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
}

/// Observed min/max of the submitted prices.
#[derive(Debug, Clone, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

pub struct StatisticsCalculator;

impl StatisticsCalculator {
    /// Calculates mean, median and mode for a non-empty price list. The list
    /// must be in original submission order: the mode tie-break depends on it.
    pub fn calculate(prices: &[f64]) -> PriceStatistics {
        let mean = prices.iter().sum::<f64>() / prices.len() as f64;

        let mut sorted = prices.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        PriceStatistics {
            mean: round2(mean),
            median: round2(Self::median(&sorted)),
            mode: round2(Self::mode(prices)),
        }
    }

    /// Median of an ascending-sorted, non-empty list: the middle value, or the
    /// average of the two middle values for an even count.
    pub fn median(sorted: &[f64]) -> f64 {
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }

    /// Observed price range of a non-empty list.
    pub fn range(prices: &[f64]) -> PriceRange {
        let mut min = prices[0];
        let mut max = prices[0];
        for &price in &prices[1..] {
            min = min.min(price);
            max = max.max(price);
        }
        PriceRange {
            min: round2(min),
            max: round2(max),
        }
    }

    /// Most frequent value. Scans in submission order with a first-seen
    /// frequency table, so a frequency tie goes to the value seen first.
    fn mode(prices: &[f64]) -> f64 {
        let mut table: Vec<(f64, usize)> = Vec::new();
        for &price in prices {
            match table.iter_mut().find(|(value, _)| *value == price) {
                Some((_, count)) => *count += 1,
                None => table.push((price, 1)),
            }
        }

        let mut best = table[0];
        for &entry in &table[1..] {
            if entry.1 > best.1 {
                best = entry;
            }
        }
        best.0
    }
}
