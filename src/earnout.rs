//! Earnout payout rules
//!
//! Two independent rules exist: a standalone earnout agreement applied
//! against raw SDE, and a seller-earnout funding source that is gated on
//! the cash actually left after debt service.

use crate::deal::{EarnoutKind, EarnoutOption, FundingSource, SourceType};

/// Payment and remaining obligation for a seller-earnout year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarnoutOutcome {
    pub payment: f64,
    pub balance: f64,
}

impl EarnoutOutcome {
    const NONE: EarnoutOutcome = EarnoutOutcome {
        payment: 0.0,
        balance: 0.0,
    };
}

/// Earnout owed this year under a standalone agreement.
///
/// Computed from raw SDE with no regard to cash availability; only the
/// lifetime cap limits it. Returns 0 when no agreement is configured.
pub fn scheduled_earnout(
    sde: f64,
    option: Option<&EarnoutOption>,
    paid_to_date: f64,
) -> f64 {
    let Some(option) = option else {
        return 0.0;
    };

    let amount = match option.kind {
        EarnoutKind::Fixed => option.amount,
        EarnoutKind::Percentage => sde * option.percentage / 100.0,
        EarnoutKind::Conditional => {
            if sde > option.threshold {
                option.amount
            } else {
                0.0
            }
        }
    };

    apply_cap(amount, option.cap, paid_to_date)
}

/// Seller-earnout payment for one year of a `seller_earnout` funding source.
///
/// The base payout splits the source amount evenly over its term; the
/// percentage and conditional rules override that. After the cap clamp the
/// payment is gated to `max(0, available_cash)` - the earnout is never paid
/// from money the business does not have, unlike debt service which is
/// assumed paid in full. Outside the payout window the outcome is zero.
pub fn seller_earnout(
    sde: f64,
    year: u32,
    source: &FundingSource,
    paid_to_date: f64,
    available_cash: f64,
) -> EarnoutOutcome {
    if source.source_type != SourceType::SellerEarnout {
        return EarnoutOutcome::NONE;
    }
    let Some(term) = source.term.filter(|&t| t > 0 && year <= t) else {
        return EarnoutOutcome::NONE;
    };

    let annual_split = source.amount / term as f64;
    let amount = match source.earnout_type {
        Some(EarnoutKind::Percentage) => sde * source.earnout_percentage / 100.0,
        Some(EarnoutKind::Conditional) => {
            if sde > source.earnout_threshold {
                annual_split
            } else {
                0.0
            }
        }
        Some(EarnoutKind::Fixed) | None => annual_split,
    };

    let payment = apply_cap(amount, source.earnout_cap, paid_to_date).min(available_cash.max(0.0));
    let balance = (source.amount - (paid_to_date + payment)).max(0.0);

    EarnoutOutcome { payment, balance }
}

/// Clamp a payment so cumulative payouts never exceed the cap
fn apply_cap(amount: f64, cap: Option<f64>, paid_to_date: f64) -> f64 {
    match cap {
        Some(cap) if paid_to_date + amount > cap => (cap - paid_to_date).max(0.0),
        _ => amount,
    }
}
