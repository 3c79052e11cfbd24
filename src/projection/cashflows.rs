//! Per-year projection rows and run summaries

use serde::{Deserialize, Serialize};

/// DSCR above this is conventionally considered healthy by lenders
pub const DSCR_HEALTHY_FLOOR: f64 = 1.25;

/// Coverage band for a year's debt-service coverage ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DscrRating {
    /// DSCR >= 1.25
    Healthy,
    /// 1.0 <= DSCR < 1.25
    Tight,
    /// DSCR < 1.0: earnings do not cover debt service
    Underwater,
}

/// A single row of projection output for one year.
///
/// All currency fields are non-negative except `net_cash_flow`. A `dscr`
/// of 0 is the sentinel for a year with no debt service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: u32,
    pub sde: f64,

    // Annual debt service by source
    pub sba_payment: f64,
    pub seller_note_payment: f64,
    pub other_loan_payment: f64,
    pub seller_earnout_payment: f64,
    pub total_debt_service: f64,

    // Cash flow and coverage
    pub net_cash_flow: f64,
    pub dscr: f64,

    // Outstanding balances at the start of the year
    pub sba_balance: f64,
    pub seller_note_balance: f64,
    pub other_loan_balance: f64,
    pub seller_earnout_balance: f64,
}

impl YearProjection {
    /// Create a row for one year with all amounts zeroed
    pub fn new(year: u32, sde: f64) -> Self {
        Self {
            year,
            sde,
            sba_payment: 0.0,
            seller_note_payment: 0.0,
            other_loan_payment: 0.0,
            seller_earnout_payment: 0.0,
            total_debt_service: 0.0,
            net_cash_flow: 0.0,
            dscr: 0.0,
            sba_balance: 0.0,
            seller_note_balance: 0.0,
            other_loan_balance: 0.0,
            seller_earnout_balance: 0.0,
        }
    }

    /// Coverage band for this year; `None` when there is no debt service
    pub fn dscr_rating(&self) -> Option<DscrRating> {
        if self.dscr <= 0.0 {
            None
        } else if self.dscr >= DSCR_HEALTHY_FLOOR {
            Some(DscrRating::Healthy)
        } else if self.dscr >= 1.0 {
            Some(DscrRating::Tight)
        } else {
            Some(DscrRating::Underwater)
        }
    }
}

/// Aggregate totals over a full projection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_sde: f64,
    pub total_debt_service: f64,
    /// Seller-earnout payouts plus the standalone earnout total
    pub total_earnout: f64,
    pub total_net_cash_flow: f64,
    /// Mean DSCR over years that carried debt; 0 when no year did
    pub average_dscr: f64,
}

impl ProjectionSummary {
    /// Fold year rows into run totals.
    ///
    /// `scheduled_earnout_paid` is the cumulative standalone-earnout total
    /// from the run state; it is not on the rows because the standalone
    /// agreement is not part of the capital structure.
    pub fn from_years(rows: &[YearProjection], scheduled_earnout_paid: f64) -> Self {
        let seller_earnout: f64 = rows.iter().map(|r| r.seller_earnout_payment).sum();

        let covered_years: Vec<f64> = rows
            .iter()
            .filter(|r| r.dscr > 0.0)
            .map(|r| r.dscr)
            .collect();
        let average_dscr = if covered_years.is_empty() {
            0.0
        } else {
            covered_years.iter().sum::<f64>() / covered_years.len() as f64
        };

        Self {
            total_sde: rows.iter().map(|r| r.sde).sum(),
            total_debt_service: rows.iter().map(|r| r.total_debt_service).sum(),
            total_earnout: seller_earnout + scheduled_earnout_paid,
            total_net_cash_flow: rows.iter().map(|r| r.net_cash_flow).sum(),
            average_dscr,
        }
    }
}

/// Complete projection result: one row per year plus the run summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub projections: Vec<YearProjection>,
    pub summary: ProjectionSummary,
}
