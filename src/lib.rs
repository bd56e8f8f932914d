//! Willingness-to-pay analysis for crowd campaigns.
//!
//! Pledges record the most a supporter would pay for a planned product.
//! The analyzer turns a campaign's pledges into a pricing report: summary
//! statistics, a bracket distribution, tiered price suggestions, intensity
//! segments, a demand curve and the revenue-maximizing price.

pub mod analyzer;
pub mod config;
pub mod model;
pub mod storage;
pub mod utils;

pub use analyzer::{Analyzer, PricingAnalysis, PricingEngine};
pub use model::{AnalysisError, EndorsementIntensity, PricedPledge, PriceSubmission, StorageError};
pub use storage::{PledgeSource, SqliteStore};
