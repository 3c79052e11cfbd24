//! Projection engine for multi-year debt-service and cash-flow runs

mod cashflows;
mod engine;
mod state;

pub use cashflows::{DscrRating, ProjectionResult, ProjectionSummary, YearProjection};
pub use engine::{ProjectionConfig, ProjectionEngine, DEFAULT_PROJECTION_YEARS};
pub use state::ProjectionState;
