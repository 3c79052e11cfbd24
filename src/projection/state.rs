//! Run state carried across projection years

/// Accumulator state for one projection run.
///
/// Both earnout rules cap cumulative payouts, so the running totals have to
/// travel with the year loop; everything else in a projection year is
/// recomputed from scratch.
#[derive(Debug, Clone, Default)]
pub struct ProjectionState {
    /// Current projection year (1-indexed; 0 before the first advance)
    pub year: u32,

    /// Cumulative payouts under the standalone earnout agreement
    pub scheduled_earnout_paid: f64,

    /// Cumulative payouts on the seller-earnout funding source
    pub seller_earnout_paid: f64,
}

impl ProjectionState {
    /// Initialize state at the start of a run
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next projection year
    pub fn advance_year(&mut self) {
        self.year += 1;
    }
}
