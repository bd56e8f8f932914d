// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod brackets;
pub mod demand;
pub mod pricing_analysis;
pub mod segments;
pub mod statistics;
pub mod tiers;

// Re-export the main Analyzer implementation for ease of use.
pub use pricing_analysis::{Analyzer, PricingAnalysis, PricingEngine};
