//! Core projection engine for annual debt-service and cash-flow runs

use crate::deal::{Deal, SourceType};
use crate::{earnout, loan};

use super::cashflows::{ProjectionResult, ProjectionSummary, YearProjection};
use super::state::ProjectionState;

/// Standard projection horizon in years
pub const DEFAULT_PROJECTION_YEARS: u32 = 10;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of years to project
    pub years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            years: DEFAULT_PROJECTION_YEARS,
        }
    }
}

/// Main projection engine.
///
/// Pure and stateless between calls: each run reads one `Deal` and returns
/// a fresh `ProjectionResult`, so a single engine can serve concurrent
/// callers. Precondition validation (funding mix, sane terms) is the
/// caller's job; the math here is unconditional.
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create an engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run the projection for a single deal.
    ///
    /// Each year the waterfall is fixed: loan debt service is assumed paid
    /// in full, the standalone earnout is owed against raw SDE, and only
    /// then does the seller earnout see what cash is left. Reordering any
    /// of these changes the gate budget and therefore the result.
    pub fn project(&self, deal: &Deal) -> ProjectionResult {
        let sde_by_year = deal.sde_forecast.expand(self.config.years);
        let seller_earnout_source = deal.seller_earnout_source();

        let mut state = ProjectionState::new();
        let mut rows = Vec::with_capacity(self.config.years as usize);

        for sde in sde_by_year {
            state.advance_year();
            let year = state.year;
            let mut row = YearProjection::new(year, sde);

            self.apply_debt_service(deal, year, &mut row);

            // Standalone earnout is owed on raw SDE, never cash-flow gated
            let scheduled = earnout::scheduled_earnout(
                sde,
                deal.earnout.as_ref(),
                state.scheduled_earnout_paid,
            );
            state.scheduled_earnout_paid += scheduled;

            let available_cash = sde - row.total_debt_service - scheduled;

            if let Some(source) = seller_earnout_source {
                let outcome = earnout::seller_earnout(
                    sde,
                    year,
                    source,
                    state.seller_earnout_paid,
                    available_cash,
                );
                row.seller_earnout_payment = outcome.payment;
                row.seller_earnout_balance = outcome.balance;
                state.seller_earnout_paid += outcome.payment;
            }

            row.net_cash_flow = available_cash - row.seller_earnout_payment;
            row.dscr = if row.total_debt_service > 0.0 {
                sde / row.total_debt_service
            } else {
                0.0
            };

            rows.push(row);
        }

        let summary = ProjectionSummary::from_years(&rows, state.scheduled_earnout_paid);
        ProjectionResult {
            projections: rows,
            summary,
        }
    }

    /// Compute annual payment and outstanding balance for every amortizing
    /// source still inside its term, routed into the row slot for its type.
    ///
    /// Sources past their term contribute nothing; the balance is
    /// recomputed each year rather than carried forward, so it reaches 0
    /// naturally at full term.
    fn apply_debt_service(&self, deal: &Deal, year: u32, row: &mut YearProjection) {
        for source in &deal.funding_sources {
            let Some(term) = source.term else { continue };
            if !source.amortizes_in_year(year) {
                continue;
            }

            let annual_payment = loan::monthly_payment(
                source.amount,
                source.annual_rate(),
                term,
                source.is_interest_only,
                source.interest_only_period,
            ) * 12.0;
            let balance = loan::remaining_balance(
                source.amount,
                source.annual_rate(),
                term,
                (year - 1) * 12,
                source.is_interest_only,
                source.interest_only_period,
            );

            match source.source_type {
                SourceType::Sba => {
                    row.sba_payment = annual_payment;
                    row.sba_balance = balance;
                }
                SourceType::SellerNote => {
                    row.seller_note_payment = annual_payment;
                    row.seller_note_balance = balance;
                }
                SourceType::OtherLoan => {
                    row.other_loan_payment = annual_payment;
                    row.other_loan_balance = balance;
                }
                // Equity and earnouts carry no debt service
                SourceType::DownPayment | SourceType::SellerEarnout => {}
            }
        }

        row.total_debt_service =
            row.sba_payment + row.seller_note_payment + row.other_loan_payment;
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}
