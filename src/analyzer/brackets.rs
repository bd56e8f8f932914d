use crate::utils::percentage;
use serde::Serialize;

/// One of the six fixed reporting ranges. Lower bound inclusive, upper bound
/// exclusive; the last bracket is unbounded above.
#[derive(Debug, Clone, Copy)]
pub struct PriceBracket {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

impl PriceBracket {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price < self.max
    }
}

/// The fixed bracket table. The `$` prefix in the labels is presentation only;
/// every numeric field stays unit-less.
pub const PRICE_BRACKETS: [PriceBracket; 6] = [
    PriceBracket { label: "$0-10", min: 0.0, max: 10.0 },
    PriceBracket { label: "$10-25", min: 10.0, max: 25.0 },
    PriceBracket { label: "$25-50", min: 25.0, max: 50.0 },
    PriceBracket { label: "$50-100", min: 50.0, max: 100.0 },
    PriceBracket { label: "$100-250", min: 100.0, max: 250.0 },
    PriceBracket { label: "$250+", min: 250.0, max: f64::INFINITY },
];

/// Count and share of submissions falling into one bracket. Percentages are
/// rounded per bracket and are not normalized to sum to 100.
#[derive(Debug, Clone, Serialize)]
pub struct BracketCount {
    pub bracket: &'static str,
    pub count: usize,
    pub percentage: u32,
}

pub struct BracketClassifier;

impl BracketClassifier {
    /// Tallies each price into its bracket. All six brackets are always
    /// present in table order, zero-count ones included.
    pub fn distribution(prices: &[f64]) -> Vec<BracketCount> {
        let mut counts = [0usize; PRICE_BRACKETS.len()];
        for &price in prices {
            counts[Self::bracket_index(price)] += 1;
        }

        PRICE_BRACKETS
            .iter()
            .zip(counts)
            .map(|(bracket, count)| BracketCount {
                bracket: bracket.label,
                count,
                percentage: percentage(count, prices.len()),
            })
            .collect()
    }

    fn bracket_index(price: f64) -> usize {
        PRICE_BRACKETS
            .iter()
            .position(|bracket| bracket.contains(price))
            .unwrap_or(PRICE_BRACKETS.len() - 1)
    }
}
