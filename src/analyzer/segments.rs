use crate::model::{EndorsementIntensity, PriceSubmission};
use crate::utils::round2;
use serde::Serialize;

/// Average price and headcount for one endorsement-intensity group.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentSummary {
    pub avg: f64,
    pub count: usize,
}

/// Per-intensity summaries. The tag set is closed, so the three groups are
/// plain fields rather than a map.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntensityBreakdown {
    pub neat_idea: SegmentSummary,
    pub probably_buy: SegmentSummary,
    pub take_my_money: SegmentSummary,
}

pub struct IntensitySegmenter;

impl IntensitySegmenter {
    /// Splits submissions by intensity tag. A group with no members reports
    /// `{avg: 0, count: 0}`.
    pub fn breakdown(submissions: &[PriceSubmission]) -> IntensityBreakdown {
        IntensityBreakdown {
            neat_idea: Self::summarize(submissions, EndorsementIntensity::NeatIdea),
            probably_buy: Self::summarize(submissions, EndorsementIntensity::ProbablyBuy),
            take_my_money: Self::summarize(submissions, EndorsementIntensity::TakeMyMoney),
        }
    }

    fn summarize(
        submissions: &[PriceSubmission],
        intensity: EndorsementIntensity,
    ) -> SegmentSummary {
        let amounts: Vec<f64> = submissions
            .iter()
            .filter(|s| s.intensity == intensity)
            .map(|s| s.amount)
            .collect();

        if amounts.is_empty() {
            return SegmentSummary { avg: 0.0, count: 0 };
        }

        let avg = amounts.iter().sum::<f64>() / amounts.len() as f64;
        SegmentSummary {
            avg: round2(avg),
            count: amounts.len(),
        }
    }
}
