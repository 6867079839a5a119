//! # Payment Terms
//!
//! How the school pays the quoted total: in full in one month, or in equal
//! installments over several months.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Month;
//! use pricing_core::money::Money;
//! use pricing_core::payment::PaymentTerms;
//!
//! let terms = PaymentTerms::from_months(vec![Month::April, Month::October]).unwrap();
//! let plan = terms.rounded_schedule(Money(1_000_001.0));
//! assert_eq!(plan[0].amount, 500_000);
//! assert_eq!(plan[1].amount, 500_001);
//! ```

use chrono::Month;
use serde::{Deserialize, Serialize};

use crate::errors::{PricingError, PricingResult};
use crate::money::Money;

/// Payment arrangement printed on the agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "term")]
pub enum PaymentTerms {
    /// Whole amount due in one month
    FullAdvance { month: Month },
    /// Equal parts due in each listed month, in the order given
    Installments { months: Vec<Month> },
}

impl Default for PaymentTerms {
    fn default() -> Self {
        PaymentTerms::FullAdvance { month: Month::April }
    }
}

/// One unrounded payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub month: Month,
    pub amount: Money,
}

/// One payment in whole currency units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedInstallment {
    pub month: Month,
    pub amount: i64,
}

impl PaymentTerms {
    /// Build terms from a month list: one month is full advance, more are installments.
    pub fn from_months(months: Vec<Month>) -> PricingResult<Self> {
        let terms = match months.len() {
            0 => return Err(PricingError::missing_field("payment_months")),
            1 => PaymentTerms::FullAdvance { month: months[0] },
            _ => PaymentTerms::Installments { months },
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> PricingResult<()> {
        if let PaymentTerms::Installments { months } = self {
            if months.is_empty() {
                return Err(PricingError::missing_field("payment_months"));
            }
            for (i, month) in months.iter().enumerate() {
                if months[..i].contains(month) {
                    return Err(PricingError::invalid_input(
                        "payment_months",
                        month.name(),
                        "Month listed more than once",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Months in payment order
    pub fn months(&self) -> Vec<Month> {
        match self {
            PaymentTerms::FullAdvance { month } => vec![*month],
            PaymentTerms::Installments { months } => months.clone(),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            PaymentTerms::FullAdvance { .. } => "Full Payment in Advance".to_string(),
            PaymentTerms::Installments { months } => format!("{} Installments", months.len()),
        }
    }

    /// Split `total` evenly over the payment months, unrounded.
    pub fn schedule(&self, total: Money) -> Vec<Installment> {
        let months = self.months();
        if months.is_empty() {
            return Vec::new();
        }
        let share = total / months.len() as f64;
        months
            .into_iter()
            .map(|month| Installment { month, amount: share })
            .collect()
    }

    /// Split the rounded `total` into whole-unit installments.
    ///
    /// Every installment but the last is `total / n` (integer division); the
    /// last takes the remainder, so the installments always sum to
    /// `total.rounded()`.
    pub fn rounded_schedule(&self, total: Money) -> Vec<RoundedInstallment> {
        let months = self.months();
        if months.is_empty() {
            return Vec::new();
        }
        let whole = total.rounded();
        let n = months.len() as i64;
        let share = whole / n;
        let last = whole - share * (n - 1);

        let count = months.len();
        months
            .into_iter()
            .enumerate()
            .map(|(i, month)| RoundedInstallment {
                month,
                amount: if i + 1 == count { last } else { share },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_month_is_full_advance() {
        let terms = PaymentTerms::from_months(vec![Month::June]).unwrap();
        assert_eq!(terms, PaymentTerms::FullAdvance { month: Month::June });
        assert_eq!(terms.display_name(), "Full Payment in Advance");
    }

    #[test]
    fn test_default_is_april_advance() {
        assert_eq!(PaymentTerms::default().months(), vec![Month::April]);
    }

    #[test]
    fn test_empty_months_rejected() {
        let err = PaymentTerms::from_months(Vec::new()).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_duplicate_month_rejected() {
        let err = PaymentTerms::from_months(vec![Month::April, Month::May, Month::April]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unrounded_schedule() {
        let terms = PaymentTerms::from_months(vec![Month::April, Month::August, Month::December]).unwrap();
        assert_eq!(terms.display_name(), "3 Installments");
        let plan = terms.schedule(Money(900.0));
        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(|i| i.amount == Money(300.0)));
        assert_eq!(plan[1].month, Month::August);
    }

    #[test]
    fn test_rounded_schedule_sums_to_total() {
        let terms = PaymentTerms::from_months(vec![Month::April, Month::August, Month::December]).unwrap();
        let total = Money(3_662_500.4);
        let plan = terms.rounded_schedule(total);
        let sum: i64 = plan.iter().map(|i| i.amount).sum();
        assert_eq!(sum, 3_662_500);
        assert_eq!(plan[0].amount, 1_220_833);
        assert_eq!(plan[2].amount, 1_220_834);
    }

    #[test]
    fn test_serialization() {
        let terms = PaymentTerms::Installments {
            months: vec![Month::April, Month::October],
        };
        let json = serde_json::to_string(&terms).unwrap();
        assert!(json.contains("\"term\":\"Installments\""));
        let roundtrip: PaymentTerms = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, terms);
    }
}
