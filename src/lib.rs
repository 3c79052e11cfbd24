//! Dealcast - projection engine for business-acquisition financing structures
//!
//! This library provides:
//! - Fixed-rate loan amortization with optional interest-only periods
//! - SDE forecasting (flat, compounding growth, explicit per-year)
//! - Seller earnout rules with caps and cash-flow gating
//! - Multi-source debt-service projections with a DSCR risk summary
//! - Batch scenario runs for forecast sensitivity

pub mod deal;
pub mod earnout;
pub mod forecast;
pub mod loan;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use deal::{Deal, EarnoutKind, EarnoutOption, FundingSource, SourceType};
pub use forecast::SdeForecast;
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, YearProjection};
pub use scenario::ScenarioRunner;
