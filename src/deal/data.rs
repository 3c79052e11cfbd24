//! Deal input structures matching the intake payload format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::forecast::SdeForecast;

/// Role a funding source plays in the capital structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Buyer equity; no debt service
    DownPayment,
    /// SBA 7(a) style bank loan
    Sba,
    /// Note carried by the seller
    SellerNote,
    /// Any other amortizing loan
    OtherLoan,
    /// Deferred seller consideration paid from surplus cash flow
    SellerEarnout,
}

impl SourceType {
    /// Whether this source amortizes like a loan (i.e. contributes debt service)
    pub fn is_loan(&self) -> bool {
        matches!(
            self,
            SourceType::Sba | SourceType::SellerNote | SourceType::OtherLoan
        )
    }

    /// Human-readable label for reports
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::DownPayment => "Down Payment",
            SourceType::Sba => "SBA Loan",
            SourceType::SellerNote => "Seller Note",
            SourceType::OtherLoan => "Other Loan",
            SourceType::SellerEarnout => "Seller Earnout",
        }
    }
}

/// Payout rule for an earnout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarnoutKind {
    /// Fixed dollar amount per year
    Fixed,
    /// Percentage of that year's SDE
    Percentage,
    /// Fixed amount paid only when SDE clears a threshold
    Conditional,
}

/// Standalone earnout agreement applied against raw SDE.
///
/// Unlike a `seller_earnout` funding source, this is owed regardless of
/// cash availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnoutOption {
    #[serde(rename = "type")]
    pub kind: EarnoutKind,

    /// Annual payout for `fixed` and `conditional` rules
    #[serde(default)]
    pub amount: f64,

    /// Share of SDE in percent for the `percentage` rule
    #[serde(default)]
    pub percentage: f64,

    /// SDE hurdle for the `conditional` rule
    #[serde(default)]
    pub threshold: f64,

    /// Lifetime payout ceiling across all years
    #[serde(default)]
    pub cap: Option<f64>,
}

/// One component of the capital structure funding the purchase.
///
/// Numeric fields default to zero so partially filled-in deals still
/// project (the intake form recomputes as the user types).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingSource {
    /// Caller-assigned identifier, opaque to the engine
    pub id: String,

    /// Optional display label for reports
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub source_type: SourceType,

    /// Capital contributed by this source
    #[serde(default)]
    pub amount: f64,

    /// Share of the business price in percent; maintained by the caller,
    /// the engine computes from `amount` only
    #[serde(default)]
    pub percentage: f64,

    /// Loan term or earnout payout horizon in years
    #[serde(default)]
    pub term: Option<u32>,

    /// Annual interest rate in percent (10.25 = 10.25%)
    #[serde(default)]
    pub interest_rate: f64,

    /// Whether the loan starts with an interest-only period
    #[serde(default)]
    pub is_interest_only: bool,

    /// Length of the interest-only period in years
    #[serde(default)]
    pub interest_only_period: u32,

    /// Payout rule for `seller_earnout` sources; even annual split when absent
    #[serde(default)]
    pub earnout_type: Option<EarnoutKind>,

    /// Share of SDE in percent for the `percentage` earnout rule
    #[serde(default)]
    pub earnout_percentage: f64,

    /// SDE hurdle for the `conditional` earnout rule
    #[serde(default)]
    pub earnout_threshold: f64,

    /// Lifetime earnout ceiling
    #[serde(default)]
    pub earnout_cap: Option<f64>,
}

impl FundingSource {
    /// Create a down-payment (equity) source
    pub fn down_payment(id: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            source_type: SourceType::DownPayment,
            amount,
            percentage: 0.0,
            term: None,
            interest_rate: 0.0,
            is_interest_only: false,
            interest_only_period: 0,
            earnout_type: None,
            earnout_percentage: 0.0,
            earnout_threshold: 0.0,
            earnout_cap: None,
        }
    }

    /// Create an amortizing loan source
    pub fn loan(
        id: impl Into<String>,
        source_type: SourceType,
        amount: f64,
        term: u32,
        interest_rate: f64,
    ) -> Self {
        Self {
            source_type,
            term: Some(term),
            interest_rate,
            ..Self::down_payment(id, amount)
        }
    }

    /// Create a seller-earnout source paid evenly over `term` years
    pub fn seller_earnout(id: impl Into<String>, amount: f64, term: u32) -> Self {
        Self {
            source_type: SourceType::SellerEarnout,
            term: Some(term),
            ..Self::down_payment(id, amount)
        }
    }

    /// Add an interest-only grace period to a loan source
    pub fn with_interest_only(mut self, years: u32) -> Self {
        self.is_interest_only = true;
        self.interest_only_period = years;
        self
    }

    /// Annual rate as a decimal fraction for the amortization math
    pub fn annual_rate(&self) -> f64 {
        self.interest_rate / 100.0
    }

    /// Whether this source contributes debt service in the given year
    pub fn amortizes_in_year(&self, year: u32) -> bool {
        self.source_type.is_loan()
            && self.amount > 0.0
            && self.term.is_some_and(|term| year <= term)
    }
}

/// A complete acquisition financing case: price, capital structure,
/// earnings forecast, and optional standalone earnout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Optional label for reports
    #[serde(default)]
    pub name: Option<String>,

    /// Date the analysis was prepared (report metadata only)
    #[serde(default)]
    pub prepared_on: Option<NaiveDate>,

    /// Purchase price of the business
    pub business_price: f64,

    /// Capital structure; amounts are expected to sum to `business_price`
    pub funding_sources: Vec<FundingSource>,

    /// Earnings forecast driving debt-service capacity
    pub sde_forecast: SdeForecast,

    /// Standalone earnout applied against raw SDE
    #[serde(default)]
    pub earnout: Option<EarnoutOption>,
}

impl Deal {
    /// Create a deal with no report metadata
    pub fn new(
        business_price: f64,
        funding_sources: Vec<FundingSource>,
        sde_forecast: SdeForecast,
    ) -> Self {
        Self {
            name: None,
            prepared_on: None,
            business_price,
            funding_sources,
            sde_forecast,
            earnout: None,
        }
    }

    /// First seller-earnout source in the structure, if any
    pub fn seller_earnout_source(&self) -> Option<&FundingSource> {
        self.funding_sources
            .iter()
            .find(|s| s.source_type == SourceType::SellerEarnout)
    }

    /// Whether the funding mix covers the purchase price
    pub fn funding_percentages_balanced(&self) -> bool {
        funding_percentages_balanced(&self.funding_sources)
    }
}

/// Check that funding-source percentages sum to 100%, within a small
/// rounding tolerance. Percentages are taken as-is; amounts are not
/// re-derived.
pub fn funding_percentages_balanced(sources: &[FundingSource]) -> bool {
    let total: f64 = sources.iter().map(|s| s.percentage).sum();
    (total - 100.0).abs() < 0.01
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_with_percentage(pct: f64) -> FundingSource {
        FundingSource {
            percentage: pct,
            ..FundingSource::down_payment("dp", 0.0)
        }
    }

    #[test]
    fn test_percentage_balance_tolerance() {
        assert!(!funding_percentages_balanced(&[
            source_with_percentage(50.0),
            source_with_percentage(45.0),
        ]));
        assert!(!funding_percentages_balanced(&[
            source_with_percentage(50.0),
            source_with_percentage(55.0),
        ]));
        assert!(funding_percentages_balanced(&[
            source_with_percentage(49.995),
            source_with_percentage(50.0),
        ]));
        assert!(funding_percentages_balanced(&[
            source_with_percentage(50.005),
            source_with_percentage(50.0),
        ]));
    }

    #[test]
    fn test_amortizes_in_year() {
        let loan = FundingSource::loan("sba-1", SourceType::Sba, 800_000.0, 10, 10.25);
        assert!(loan.amortizes_in_year(1));
        assert!(loan.amortizes_in_year(10));
        assert!(!loan.amortizes_in_year(11));

        let equity = FundingSource::down_payment("dp-1", 200_000.0);
        assert!(!equity.amortizes_in_year(1));

        let earnout = FundingSource::seller_earnout("eo-1", 100_000.0, 3);
        assert!(!earnout.amortizes_in_year(1));
    }

    #[test]
    fn test_deserialize_minimal_source() {
        let source: FundingSource =
            serde_json::from_str(r#"{"id":"dp-1","type":"down_payment","amount":200000}"#)
                .unwrap();
        assert_eq!(source.source_type, SourceType::DownPayment);
        assert_eq!(source.amount, 200_000.0);
        assert_eq!(source.percentage, 0.0);
        assert_eq!(source.term, None);
        assert!(!source.is_interest_only);
    }

    #[test]
    fn test_deserialize_deal_payload() {
        let deal: Deal = serde_json::from_str(
            r#"{
                "business_price": 1000000,
                "funding_sources": [
                    {"id": "dp", "type": "down_payment", "amount": 200000, "percentage": 20},
                    {"id": "sba", "type": "sba", "amount": 800000, "percentage": 80,
                     "term": 10, "interest_rate": 10.25},
                    {"id": "eo", "type": "seller_earnout", "amount": 100000,
                     "term": 4, "earnout_type": "conditional", "earnout_threshold": 250000}
                ],
                "sde_forecast": {"type": "single", "base_amount": 300000},
                "earnout": {"type": "percentage", "percentage": 5, "cap": 50000}
            }"#,
        )
        .unwrap();

        assert_eq!(deal.funding_sources.len(), 3);
        let earnout_source = deal.seller_earnout_source().unwrap();
        assert_eq!(earnout_source.earnout_type, Some(EarnoutKind::Conditional));
        assert_eq!(deal.earnout.as_ref().unwrap().cap, Some(50_000.0));
    }

    #[test]
    fn test_unknown_source_type_rejected() {
        let result: Result<FundingSource, _> =
            serde_json::from_str(r#"{"id":"x","type":"mezzanine","amount":1}"#);
        assert!(result.is_err());
    }
}
