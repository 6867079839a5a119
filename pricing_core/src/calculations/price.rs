//! # Price Composition
//!
//! Marks delivery cost up to the target margin, applies the school's
//! discount, and rolls programs up into a quote-level aggregate with the
//! gross-margin gate.
//!
//! ```text
//! base_price      = total_cost / (1 - target_margin_fraction)
//! final_price     = base_price × (1 - discount_percent / 100)
//! price/student   = final_price / student_count
//! gross margin %  = (Σ final_price - Σ total_cost) / Σ final_price × 100
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::price::{aggregate, compose};
//! use pricing_core::money::Money;
//! use pricing_core::rate_card::RateCard;
//!
//! let rates = RateCard::default();
//! let price = compose(Money(600.0), 100, 0, &rates).unwrap();
//! assert_eq!(price.final_price.rounded(), 1000);
//!
//! let quote = aggregate(&[price], &rates);
//! assert!((quote.gross_margin_percent - 40.0).abs() < 1e-9);
//! assert!(quote.deliverable);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{PricingError, PricingResult};
use crate::money::Money;
use crate::rate_card::RateCard;

/// Largest discount a school can be offered, in percent
pub const MAX_DISCOUNT_PERCENT: u32 = 40;

/// Price of one program.
///
/// Values are unrounded; round only for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramPriceResult {
    /// Delivery cost the price was built from
    pub total_cost: Money,

    pub student_count: u32,

    pub discount_percent: u32,

    /// Cost inflated to the target margin
    pub base_price: Money,

    /// Base price after discount
    pub final_price: Money,

    pub price_per_student: Money,
}

impl ProgramPriceResult {
    /// Discount given away, in currency
    pub fn discount_amount(&self) -> Money {
        self.base_price - self.final_price
    }
}

/// Mark up a program's cost and apply the discount.
///
/// # Returns
///
/// * `Err(PricingError::InvalidInput)` - Zero students or discount above [`MAX_DISCOUNT_PERCENT`]
pub fn compose(
    total_cost: Money,
    student_count: u32,
    discount_percent: u32,
    rates: &RateCard,
) -> PricingResult<ProgramPriceResult> {
    if student_count == 0 {
        return Err(PricingError::invalid_input(
            "student_count",
            "0",
            "Student count must be positive",
        ));
    }
    if discount_percent > MAX_DISCOUNT_PERCENT {
        return Err(PricingError::invalid_input(
            "discount_percent",
            discount_percent.to_string(),
            format!("Discount must be between 0 and {}", MAX_DISCOUNT_PERCENT),
        ));
    }

    let base_price = total_cost / (1.0 - rates.target_margin_fraction);
    let final_price = base_price * (1.0 - f64::from(discount_percent) / 100.0);
    let price_per_student = final_price / f64::from(student_count);

    Ok(ProgramPriceResult {
        total_cost,
        student_count,
        discount_percent,
        base_price,
        final_price,
        price_per_student,
    })
}

/// Quote-level totals and the gross-margin gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteAggregate {
    pub total_cost: Money,
    pub total_students: u32,
    pub total_final_price: Money,

    /// Zero when there is no revenue
    pub gross_margin_percent: f64,

    /// Gate the margin was checked against
    pub margin_gate_percent: f64,

    /// `gross_margin_percent >= margin_gate_percent`
    pub deliverable: bool,
}

impl QuoteAggregate {
    /// Price per student across the whole quote
    pub fn average_price_per_student(&self) -> Money {
        if self.total_students == 0 {
            Money::ZERO
        } else {
            self.total_final_price / f64::from(self.total_students)
        }
    }

    /// Percentage points missing to clear the gate (zero when deliverable)
    pub fn margin_shortfall(&self) -> f64 {
        (self.margin_gate_percent - self.gross_margin_percent).max(0.0)
    }
}

/// Sum program prices (unrounded) and evaluate the margin gate.
pub fn aggregate(results: &[ProgramPriceResult], rates: &RateCard) -> QuoteAggregate {
    let total_cost: Money = results.iter().map(|r| r.total_cost).sum();
    let total_final_price: Money = results.iter().map(|r| r.final_price).sum();
    let total_students = results.iter().map(|r| r.student_count).sum();

    let gross_margin_percent = (total_final_price - total_cost).ratio(total_final_price) * 100.0;

    QuoteAggregate {
        total_cost,
        total_students,
        total_final_price,
        gross_margin_percent,
        margin_gate_percent: rates.margin_gate_percent,
        deliverable: gross_margin_percent >= rates.margin_gate_percent,
    }
}
