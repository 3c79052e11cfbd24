//! Scenario runner for batch projections
//!
//! Holds a base configuration once, then allows running many deals or
//! forecast variants without rebuilding the engine setup each time.

use crate::deal::Deal;
use crate::forecast::SdeForecast;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Batch runner over deals and forecast variants
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// for (rate, result) in runner.growth_sweep(&deal, &[0.0, 5.0, 10.0]) {
///     println!("{rate}% growth -> avg DSCR {:.2}", result.summary.average_dscr);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create a runner with the standard 10-year horizon
    pub fn new() -> Self {
        Self {
            base_config: ProjectionConfig::default(),
        }
    }

    /// Create a runner with a custom base configuration
    pub fn with_config(base_config: ProjectionConfig) -> Self {
        Self { base_config }
    }

    /// Run a single projection under the base config
    pub fn run(&self, deal: &Deal) -> ProjectionResult {
        let engine = ProjectionEngine::new(self.base_config.clone());
        engine.project(deal)
    }

    /// Run projections for multiple deals with the same config
    pub fn run_batch(&self, deals: &[Deal]) -> Vec<ProjectionResult> {
        let engine = ProjectionEngine::new(self.base_config.clone());
        deals.iter().map(|deal| engine.project(deal)).collect()
    }

    /// Re-project one deal under a range of annual SDE growth rates.
    ///
    /// The base amount is the deal's own first-year SDE; each scenario
    /// replaces the forecast with a growth forecast at the given rate.
    /// Returns one `(growth_rate, result)` pair per rate.
    pub fn growth_sweep(
        &self,
        deal: &Deal,
        growth_rates: &[f64],
    ) -> Vec<(f64, ProjectionResult)> {
        let base_amount = deal
            .sde_forecast
            .expand(1)
            .first()
            .copied()
            .unwrap_or(0.0);
        let engine = ProjectionEngine::new(self.base_config.clone());

        growth_rates
            .iter()
            .map(|&growth_rate| {
                let mut scenario = deal.clone();
                scenario.sde_forecast = SdeForecast::Growth {
                    base_amount,
                    growth_rate,
                };
                (growth_rate, engine.project(&scenario))
            })
            .collect()
    }

    /// Base configuration used for every run
    pub fn config(&self) -> &ProjectionConfig {
        &self.base_config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::{FundingSource, SourceType};

    fn test_deal() -> Deal {
        Deal::new(
            1_000_000.0,
            vec![
                FundingSource::down_payment("dp", 200_000.0),
                FundingSource::loan("sba", SourceType::Sba, 800_000.0, 10, 10.25),
            ],
            SdeForecast::Single {
                base_amount: 300_000.0,
            },
        )
    }

    #[test]
    fn test_growth_sweep_is_monotone_in_growth() {
        let runner = ScenarioRunner::new();
        let results = runner.growth_sweep(&test_deal(), &[0.0, 5.0, 10.0]);
        assert_eq!(results.len(), 3);

        // Same first-year SDE everywhere, more growth means more cash
        assert!(
            results[2].1.summary.total_net_cash_flow > results[0].1.summary.total_net_cash_flow
        );
        assert!(results[2].1.summary.average_dscr > results[0].1.summary.average_dscr);

        // Zero growth matches the flat forecast
        let flat = runner.run(&test_deal());
        assert_eq!(
            results[0].1.summary.total_sde,
            flat.summary.total_sde
        );
    }

    #[test]
    fn test_run_batch() {
        let runner = ScenarioRunner::new();
        let deals = vec![test_deal(), test_deal()];
        let results = runner.run_batch(&deals);
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].summary.total_sde,
            results[1].summary.total_sde
        );
    }
}
