use crate::analyzer::brackets::{BracketClassifier, BracketCount};
use crate::analyzer::demand::{DemandCurveBuilder, DemandPoint, RevenueOptimizer};
use crate::analyzer::segments::{IntensityBreakdown, IntensitySegmenter};
use crate::analyzer::statistics::{PriceRange, StatisticsCalculator};
use crate::analyzer::tiers::{SuggestedPricePoints, TierRecommender};
use crate::model::{AnalysisError, PriceSubmission};
use crate::storage::PledgeSource;
use serde::Serialize;
use tracing::debug;

/// Trait defining the interface for a campaign pricing analyzer.
#[async_trait::async_trait]
pub trait Analyzer {
    async fn analyze_campaign(&self, campaign_id: i64) -> Result<PricingAnalysis, AnalysisError>;
}

/// Full willingness-to-pay report for one campaign.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingAnalysis {
    pub total_responses: usize,
    pub average_price: f64,
    pub median_price: f64,
    pub mode_price: f64,
    pub price_range: PriceRange,
    pub distribution: Vec<BracketCount>,
    pub suggested_price_points: SuggestedPricePoints,
    pub by_intensity: IntensityBreakdown,
    pub demand_curve: Vec<DemandPoint>,
    pub optimal_price: f64,
    pub max_revenue: f64,
}

impl PricingAnalysis {
    /// Report for a campaign with no usable submissions. Every figure is zero
    /// and the distribution still lists all six brackets.
    pub fn empty() -> Self {
        Self {
            total_responses: 0,
            average_price: 0.0,
            median_price: 0.0,
            mode_price: 0.0,
            price_range: PriceRange { min: 0.0, max: 0.0 },
            distribution: BracketClassifier::distribution(&[]),
            suggested_price_points: SuggestedPricePoints {
                economy: 0.0,
                standard: 0.0,
                premium: 0.0,
            },
            by_intensity: IntensitySegmenter::breakdown(&[]),
            demand_curve: Vec::new(),
            optimal_price: 0.0,
            max_revenue: 0.0,
        }
    }

    /// Composes the report from already-filtered submissions.
    pub fn from_submissions(submissions: &[PriceSubmission]) -> Self {
        if submissions.is_empty() {
            return Self::empty();
        }

        let prices: Vec<f64> = submissions.iter().map(|s| s.amount).collect();

        let stats = StatisticsCalculator::calculate(&prices);
        let range = StatisticsCalculator::range(&prices);
        let optimum = RevenueOptimizer::optimize(&prices, stats.median);

        Self {
            total_responses: submissions.len(),
            average_price: stats.mean,
            median_price: stats.median,
            mode_price: stats.mode,
            price_range: range,
            distribution: BracketClassifier::distribution(&prices),
            suggested_price_points: TierRecommender::recommend(&prices),
            by_intensity: IntensitySegmenter::breakdown(submissions),
            demand_curve: DemandCurveBuilder::build(&prices),
            optimal_price: optimum.price,
            max_revenue: optimum.revenue,
        }
    }
}

/// Analyzer backed by a pledge source. Loads the campaign's pledges, keeps
/// the ones with a positive price ceiling and composes the report.
pub struct PricingEngine<S: PledgeSource> {
    source: S,
}

impl<S: PledgeSource> PricingEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait::async_trait]
impl<S: PledgeSource> Analyzer for PricingEngine<S> {
    async fn analyze_campaign(&self, campaign_id: i64) -> Result<PricingAnalysis, AnalysisError> {
        let pledges = self.source.list_priced_pledges(campaign_id).await?;
        let submissions: Vec<PriceSubmission> = pledges
            .iter()
            .filter_map(PriceSubmission::from_pledge)
            .collect();
        debug!(
            "Campaign {}: {} pledges loaded, {} usable submissions",
            campaign_id,
            pledges.len(),
            submissions.len()
        );
        Ok(PricingAnalysis::from_submissions(&submissions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EndorsementIntensity, PricedPledge, StorageError};

    struct FixedSource(Vec<PricedPledge>);

    #[async_trait::async_trait]
    impl PledgeSource for FixedSource {
        async fn list_priced_pledges(
            &self,
            _campaign_id: i64,
        ) -> Result<Vec<PricedPledge>, StorageError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl PledgeSource for FailingSource {
        async fn list_priced_pledges(
            &self,
            _campaign_id: i64,
        ) -> Result<Vec<PricedPledge>, StorageError> {
            Err(StorageError::InvalidData("simulated outage".into()))
        }
    }

    fn pledge(price_ceiling: Option<f64>, intensity: Option<EndorsementIntensity>) -> PricedPledge {
        PricedPledge {
            price_ceiling,
            intensity,
        }
    }

    #[tokio::test]
    async fn engine_composes_full_report() {
        let engine = PricingEngine::new(FixedSource(vec![
            pledge(Some(10.0), Some(EndorsementIntensity::NeatIdea)),
            pledge(Some(10.0), Some(EndorsementIntensity::ProbablyBuy)),
            pledge(Some(20.0), Some(EndorsementIntensity::ProbablyBuy)),
            pledge(Some(30.0), Some(EndorsementIntensity::TakeMyMoney)),
            pledge(Some(100.0), Some(EndorsementIntensity::TakeMyMoney)),
        ]));
        let report = engine.analyze_campaign(1).await.unwrap();

        assert_eq!(report.total_responses, 5);
        assert_eq!(report.average_price, 34.0);
        assert_eq!(report.median_price, 20.0);
        assert_eq!(report.mode_price, 10.0);
        assert_eq!(report.price_range.min, 10.0);
        assert_eq!(report.price_range.max, 100.0);
        assert_eq!(report.suggested_price_points.economy, 10.0);
        assert_eq!(report.suggested_price_points.standard, 20.0);
        assert_eq!(report.suggested_price_points.premium, 30.0);
        assert_eq!(report.optimal_price, 100.0);
        assert_eq!(report.max_revenue, 100.0);
        assert_eq!(report.demand_curve.len(), 4);
    }

    #[tokio::test]
    async fn engine_drops_null_and_nonpositive_ceilings() {
        let engine = PricingEngine::new(FixedSource(vec![
            pledge(None, Some(EndorsementIntensity::TakeMyMoney)),
            pledge(Some(0.0), None),
            pledge(Some(-5.0), None),
            pledge(Some(25.0), None),
        ]));
        let report = engine.analyze_campaign(7).await.unwrap();

        assert_eq!(report.total_responses, 1);
        assert_eq!(report.average_price, 25.0);
        // Missing endorsements fall back to the lowest intensity.
        assert_eq!(report.by_intensity.neat_idea.count, 1);
        assert_eq!(report.by_intensity.neat_idea.avg, 25.0);
    }

    #[tokio::test]
    async fn engine_returns_empty_report_without_submissions() {
        let engine = PricingEngine::new(FixedSource(vec![pledge(None, None)]));
        let report = engine.analyze_campaign(3).await.unwrap();

        assert_eq!(report.total_responses, 0);
        assert_eq!(report.optimal_price, 0.0);
        assert_eq!(report.max_revenue, 0.0);
        assert_eq!(report.distribution.len(), 6);
        assert!(report.distribution.iter().all(|b| b.count == 0));
        assert!(report.demand_curve.is_empty());
    }

    #[tokio::test]
    async fn engine_propagates_storage_failures() {
        let engine = PricingEngine::new(FailingSource);
        let err = engine.analyze_campaign(9).await.unwrap_err();
        assert!(matches!(err, AnalysisError::DataLoad(_)));
    }

    #[test]
    fn empty_report_serializes_with_camel_case_fields() {
        let value = serde_json::to_value(PricingAnalysis::empty()).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("totalResponses"));
        assert!(object.contains_key("averagePrice"));
        assert!(object.contains_key("medianPrice"));
        assert!(object.contains_key("modePrice"));
        assert!(object.contains_key("priceRange"));
        assert!(object.contains_key("suggestedPricePoints"));
        assert!(object.contains_key("byIntensity"));
        assert!(object.contains_key("demandCurve"));
        assert!(object.contains_key("optimalPrice"));
        assert!(object.contains_key("maxRevenue"));
    }

    #[test]
    fn single_submission_report_repeats_the_price_everywhere() {
        let submissions = vec![PriceSubmission {
            amount: 42.0,
            intensity: EndorsementIntensity::TakeMyMoney,
        }];
        let report = PricingAnalysis::from_submissions(&submissions);

        assert_eq!(report.average_price, 42.0);
        assert_eq!(report.median_price, 42.0);
        assert_eq!(report.mode_price, 42.0);
        assert_eq!(report.price_range.min, 42.0);
        assert_eq!(report.price_range.max, 42.0);
        assert_eq!(report.suggested_price_points.economy, 42.0);
        assert_eq!(report.suggested_price_points.standard, 42.0);
        assert_eq!(report.suggested_price_points.premium, 42.0);
        assert_eq!(report.optimal_price, 42.0);
        assert_eq!(report.by_intensity.take_my_money.count, 1);
        assert_eq!(report.by_intensity.neat_idea.count, 0);
    }
}
