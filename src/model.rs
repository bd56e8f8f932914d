// Core structs: PricedPledge, PriceSubmission, CampaignRecord
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Endorsement strength a supporter attaches to a campaign.
/// Ordered weakest to strongest: NEAT_IDEA < PROBABLY_BUY < TAKE_MY_MONEY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndorsementIntensity {
    NeatIdea,
    ProbablyBuy,
    TakeMyMoney,
}

impl EndorsementIntensity {
    /// Text tag as stored in the database.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::NeatIdea => "NEAT_IDEA",
            Self::ProbablyBuy => "PROBABLY_BUY",
            Self::TakeMyMoney => "TAKE_MY_MONEY",
        }
    }

    /// Parses a stored tag. An unknown tag is corrupt data, not a default.
    pub fn from_tag(tag: &str) -> Result<Self, StorageError> {
        match tag {
            "NEAT_IDEA" => Ok(Self::NeatIdea),
            "PROBABLY_BUY" => Ok(Self::ProbablyBuy),
            "TAKE_MY_MONEY" => Ok(Self::TakeMyMoney),
            other => Err(StorageError::InvalidData(format!(
                "unknown intensity tag: {}",
                other
            ))),
        }
    }
}

/// Raw pledge row as returned by the data layer. Both the price ceiling and
/// the intensity tag may be missing.
#[derive(Debug, Clone)]
pub struct PricedPledge {
    pub price_ceiling: Option<f64>,
    pub intensity: Option<EndorsementIntensity>,
}

/// A qualifying willingness-to-pay submission: a strictly positive amount plus
/// the submitter's endorsement intensity.
#[derive(Debug, Clone)]
pub struct PriceSubmission {
    pub amount: f64,
    pub intensity: EndorsementIntensity,
}

impl PriceSubmission {
    /// Applies the join-boundary rules in one place: pledges without a ceiling
    /// or with a non-positive ceiling are dropped, and a missing intensity tag
    /// falls back to `NeatIdea`.
    pub fn from_pledge(pledge: &PricedPledge) -> Option<Self> {
        match pledge.price_ceiling {
            Some(amount) if amount > 0.0 => Some(Self {
                amount,
                intensity: pledge.intensity.unwrap_or(EndorsementIntensity::NeatIdea),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CampaignRecord {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("invalid row data: {0}")]
    InvalidData(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to load pledges: {0}")]
    DataLoad(#[from] StorageError),
}
