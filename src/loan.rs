//! Fixed-rate loan amortization math
//!
//! Rates are decimal fractions (0.1025 for 10.25%); conversion from the
//! percent figures carried on funding sources happens in the projection
//! engine.

/// Monthly payment for a fixed-rate loan.
///
/// During an interest-only period the payment is flat interest on the full
/// principal (`principal * annual_rate / 12`), ignoring the term. Otherwise
/// the standard annuity payment applies, falling back to straight principal
/// division at a zero rate.
pub fn monthly_payment(
    principal: f64,
    annual_rate: f64,
    term_years: u32,
    interest_only: bool,
    interest_only_years: u32,
) -> f64 {
    if interest_only && interest_only_years > 0 {
        return principal * annual_rate / 12.0;
    }

    let monthly_rate = annual_rate / 12.0;
    let num_payments = (term_years * 12) as f64;

    if monthly_rate == 0.0 {
        return principal / num_payments;
    }

    let growth = (1.0 + monthly_rate).powf(num_payments);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Outstanding balance after `payments_made` monthly payments.
///
/// Returns 0 once the full term has elapsed. During an interest-only grace
/// window the balance stays at the original principal (no amortization).
/// Post-grace, the remaining-balance formula always uses the
/// full-amortization payment rather than the interest-only one; this
/// matches the pricing model the schedule was validated against and must
/// not be "corrected" to use the flat-interest payment.
pub fn remaining_balance(
    principal: f64,
    annual_rate: f64,
    term_years: u32,
    payments_made: u32,
    interest_only: bool,
    interest_only_years: u32,
) -> f64 {
    let monthly_rate = annual_rate / 12.0;
    let total_payments = term_years * 12;

    if payments_made >= total_payments {
        return 0.0;
    }

    if interest_only && payments_made <= interest_only_years * 12 {
        // No principal reduction during the interest-only period
        return principal;
    }

    let payment = monthly_payment(principal, annual_rate, term_years, false, 0);
    let remaining = (total_payments - payments_made) as f64;

    if monthly_rate == 0.0 {
        return (principal - payment * payments_made as f64).max(0.0);
    }

    payment * (1.0 - (1.0 + monthly_rate).powf(-remaining)) / monthly_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_rate_payment_is_linear() {
        // 120k over 10 years at 0% = 1k/month exactly
        assert_eq!(monthly_payment(120_000.0, 0.0, 10, false, 0), 1_000.0);
    }

    #[test]
    fn test_zero_rate_balance_declines_linearly() {
        let principal = 120_000.0;
        assert_eq!(remaining_balance(principal, 0.0, 10, 0, false, 0), principal);
        assert_eq!(remaining_balance(principal, 0.0, 10, 60, false, 0), 60_000.0);
        assert_eq!(remaining_balance(principal, 0.0, 10, 120, false, 0), 0.0);
    }

    #[test]
    fn test_annuity_payment_known_value() {
        // 800k, 10.25% annual, 10 years -> ~$10,684/month
        let pmt = monthly_payment(800_000.0, 0.1025, 10, false, 0);
        assert_relative_eq!(pmt, 10_684.0, max_relative = 1e-3);
    }

    #[test]
    fn test_balance_endpoints() {
        let pmt0 = remaining_balance(800_000.0, 0.1025, 10, 0, false, 0);
        assert_relative_eq!(pmt0, 800_000.0, max_relative = 1e-9);
        assert_eq!(remaining_balance(800_000.0, 0.1025, 10, 120, false, 0), 0.0);
    }

    #[test]
    fn test_balance_decreases_monotonically() {
        let mut prev = f64::MAX;
        for months in (0..=120).step_by(12) {
            let bal = remaining_balance(500_000.0, 0.08, 10, months, false, 0);
            assert!(bal < prev);
            prev = bal;
        }
    }

    #[test]
    fn test_interest_only_payment_is_flat_interest() {
        // 10% on 300k = 30k/year = 2.5k/month regardless of term
        assert_relative_eq!(
            monthly_payment(300_000.0, 0.10, 5, true, 2),
            2_500.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            monthly_payment(300_000.0, 0.10, 30, true, 2),
            2_500.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_interest_only_flag_without_period_amortizes() {
        let io = monthly_payment(300_000.0, 0.10, 5, true, 0);
        let amort = monthly_payment(300_000.0, 0.10, 5, false, 0);
        assert_eq!(io, amort);
    }

    #[test]
    fn test_balance_unchanged_during_grace_window() {
        let principal = 300_000.0;
        for months in [0, 12, 24] {
            assert_eq!(
                remaining_balance(principal, 0.10, 10, months, true, 2),
                principal
            );
        }
        // First month past the grace window starts amortizing
        let bal = remaining_balance(principal, 0.10, 10, 25, true, 2);
        assert!(bal < principal);
    }

    #[test]
    fn test_zero_principal() {
        assert_eq!(monthly_payment(0.0, 0.08, 10, false, 0), 0.0);
        assert_eq!(remaining_balance(0.0, 0.08, 10, 12, false, 0), 0.0);
    }
}
