//! SDE forecast shapes and expansion to an annual sequence

use serde::{Deserialize, Serialize};

/// Forecast of Seller's Discretionary Earnings over the projection horizon.
///
/// Tagged on `type` to match the intake payload (`single`, `growth`,
/// `yearly`). Unknown tags are rejected at deserialization rather than
/// silently producing an empty projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SdeForecast {
    /// Flat earnings, every year equal to the base amount
    Single {
        #[serde(default)]
        base_amount: f64,
    },
    /// Compounding growth from a base-year amount
    Growth {
        #[serde(default)]
        base_amount: f64,
        /// Annual growth rate in percent (10 = 10%)
        #[serde(default)]
        growth_rate: f64,
    },
    /// Explicit per-year amounts; short sequences pad with zeros
    Yearly {
        #[serde(default)]
        yearly_amounts: Vec<f64>,
    },
}

impl SdeForecast {
    /// Expand to exactly `years` annual SDE figures.
    pub fn expand(&self, years: u32) -> Vec<f64> {
        match self {
            SdeForecast::Single { base_amount } => vec![*base_amount; years as usize],
            SdeForecast::Growth {
                base_amount,
                growth_rate,
            } => {
                let factor = 1.0 + growth_rate / 100.0;
                (0..years)
                    .map(|i| base_amount * factor.powi(i as i32))
                    .collect()
            }
            SdeForecast::Yearly { yearly_amounts } => (0..years as usize)
                .map(|i| yearly_amounts.get(i).copied().unwrap_or(0.0))
                .collect(),
        }
    }
}

impl Default for SdeForecast {
    fn default() -> Self {
        SdeForecast::Single { base_amount: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_repeats_base_amount() {
        let forecast = SdeForecast::Single {
            base_amount: 1_000.0,
        };
        let sde = forecast.expand(10);
        assert_eq!(sde.len(), 10);
        assert!(sde.iter().all(|&v| v == 1_000.0));
    }

    #[test]
    fn test_growth_compounds() {
        let forecast = SdeForecast::Growth {
            base_amount: 1_000.0,
            growth_rate: 10.0,
        };
        let sde = forecast.expand(3);
        assert_relative_eq!(sde[0], 1_000.0, max_relative = 1e-12);
        assert_relative_eq!(sde[1], 1_100.0, max_relative = 1e-12);
        assert_relative_eq!(sde[2], 1_210.0, max_relative = 1e-12);
    }

    #[test]
    fn test_yearly_pads_short_sequences_with_zero() {
        let forecast = SdeForecast::Yearly {
            yearly_amounts: vec![100.0, 200.0, 300.0],
        };
        let sde = forecast.expand(5);
        assert_eq!(sde, vec![100.0, 200.0, 300.0, 0.0, 0.0]);
    }

    #[test]
    fn test_yearly_truncates_to_horizon() {
        let forecast = SdeForecast::Yearly {
            yearly_amounts: vec![100.0, 200.0, 300.0],
        };
        assert_eq!(forecast.expand(2), vec![100.0, 200.0]);
    }

    #[test]
    fn test_deserializes_tagged_payload() {
        let forecast: SdeForecast =
            serde_json::from_str(r#"{"type":"growth","base_amount":250000,"growth_rate":5}"#)
                .unwrap();
        assert_eq!(
            forecast,
            SdeForecast::Growth {
                base_amount: 250_000.0,
                growth_rate: 5.0,
            }
        );
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let result: Result<SdeForecast, _> =
            serde_json::from_str(r#"{"type":"quarterly","base_amount":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_base_amount_defaults_to_zero() {
        let forecast: SdeForecast = serde_json::from_str(r#"{"type":"single"}"#).unwrap();
        assert_eq!(forecast.expand(10), vec![0.0; 10]);
    }
}
