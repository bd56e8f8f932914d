use crate::utils::round2;
use serde::Serialize;

/// Cumulative demand at one observed price level: how many submissions were
/// willing to pay at least this much.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandPoint {
    pub price: f64,
    pub estimated_buyers: usize,
}

/// Revenue-maximizing price and the revenue it achieves.
#[derive(Debug, Clone)]
pub struct RevenueOptimum {
    pub price: f64,
    pub revenue: f64,
}

/// The curve is truncated to the first twenty unique price levels; higher
/// levels are silently omitted.
pub const MAX_CURVE_POINTS: usize = 20;

pub struct DemandCurveBuilder;

impl DemandCurveBuilder {
    /// Builds the cumulative demand curve over the ascending unique prices,
    /// capped at `MAX_CURVE_POINTS`.
    pub fn build(prices: &[f64]) -> Vec<DemandPoint> {
        let total = prices.len();
        let mut sorted = prices.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut points = Vec::new();
        let mut index = 0;
        while index < sorted.len() && points.len() < MAX_CURVE_POINTS {
            let price = sorted[index];
            // Everything from `index` on is >= price, so the suffix length is
            // the buyer count at this level.
            points.push(DemandPoint {
                price: round2(price),
                estimated_buyers: total - index,
            });
            while index < sorted.len() && sorted[index] == price {
                index += 1;
            }
        }

        points
    }
}

pub struct RevenueOptimizer;

impl RevenueOptimizer {
    /// Finds the price P maximizing `P × count(amount >= P)` with one
    /// suffix-count pass over the unique prices in ascending order. Only a
    /// strict improvement replaces the running best, so the first price
    /// reaching the maximum wins ties. The best starts at `(median, 0)` to
    /// keep the result defined for downstream consumers.
    pub fn optimize(prices: &[f64], median_price: f64) -> RevenueOptimum {
        let total = prices.len();
        let mut sorted = prices.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut best_price = median_price;
        let mut best_revenue = 0.0;

        let mut index = 0;
        while index < sorted.len() {
            let price = sorted[index];
            let revenue = price * (total - index) as f64;
            if revenue > best_revenue {
                best_price = price;
                best_revenue = revenue;
            }
            while index < sorted.len() && sorted[index] == price {
                index += 1;
            }
        }

        RevenueOptimum {
            price: round2(best_price),
            revenue: round2(best_revenue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_counts_buyers_at_or_above_each_level() {
        let curve = DemandCurveBuilder::build(&[10.0, 10.0, 20.0, 30.0, 100.0]);
        let points: Vec<(f64, usize)> = curve.iter().map(|p| (p.price, p.estimated_buyers)).collect();
        assert_eq!(points, vec![(10.0, 5), (20.0, 3), (30.0, 2), (100.0, 1)]);
    }

    #[test]
    fn curve_is_truncated_to_twenty_levels() {
        let prices: Vec<f64> = (1..=25).map(|n| n as f64).collect();
        let curve = DemandCurveBuilder::build(&prices);
        assert_eq!(curve.len(), MAX_CURVE_POINTS);
        // Truncation keeps the lowest levels and drops the highest.
        assert_eq!(curve[0].price, 1.0);
        assert_eq!(curve[19].price, 20.0);
    }

    #[test]
    fn curve_buyer_counts_never_increase() {
        let curve = DemandCurveBuilder::build(&[3.0, 17.0, 17.0, 42.0, 5.0, 88.0, 5.0]);
        for pair in curve.windows(2) {
            assert!(pair[0].estimated_buyers >= pair[1].estimated_buyers);
        }
    }

    #[test]
    fn empty_input_yields_empty_curve() {
        assert!(DemandCurveBuilder::build(&[]).is_empty());
    }

    #[test]
    fn optimum_picks_highest_revenue_price() {
        // Candidate revenues: 10*5=50, 20*3=60, 30*2=60, 100*1=100.
        let optimum = RevenueOptimizer::optimize(&[10.0, 10.0, 20.0, 30.0, 100.0], 20.0);
        assert_eq!(optimum.price, 100.0);
        assert_eq!(optimum.revenue, 100.0);
    }

    #[test]
    fn revenue_tie_goes_to_lower_price_found_first() {
        // 10*6=60 and 30*2=60 tie; the ascending scan reaches 10 first.
        let optimum = RevenueOptimizer::optimize(
            &[10.0, 10.0, 10.0, 15.0, 30.0, 30.0],
            12.5,
        );
        assert_eq!(optimum.price, 10.0);
        assert_eq!(optimum.revenue, 60.0);
    }

    #[test]
    fn single_submission_is_its_own_optimum() {
        let optimum = RevenueOptimizer::optimize(&[42.0], 42.0);
        assert_eq!(optimum.price, 42.0);
        assert_eq!(optimum.revenue, 42.0);
    }

    #[test]
    fn optimum_matches_buyer_count_product() {
        let prices = [12.0, 19.0, 19.0, 27.0, 50.0, 64.0, 64.0, 80.0];
        let optimum = RevenueOptimizer::optimize(&prices, 38.5);
        let buyers = prices.iter().filter(|&&p| p >= optimum.price).count();
        assert!((optimum.price * buyers as f64 - optimum.revenue).abs() < 0.01);
    }
}
