//! # Commercial Split
//!
//! Decomposes a per-student price for invoicing. Up to the program's book
//! ceiling the price is book price (not taxed); anything above is a service
//! fee, taxed at the rate card's tax rate.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::commercial::split;
//! use pricing_core::catalog::ProgramCategory;
//! use pricing_core::money::Money;
//! use pricing_core::rate_card::RateCard;
//!
//! let rates = RateCard::default();
//!
//! let line = split(ProgramCategory::Communication, Money(2_000.0), &rates);
//! assert_eq!(line.book_price, Money(1_500.0));
//! assert_eq!(line.service_fee, Money(500.0));
//! assert_eq!(line.tax, Money(90.0));
//!
//! let below = split(ProgramCategory::Stem, Money(2_000.0), &rates);
//! assert_eq!(below.service_fee, Money::ZERO);
//! assert_eq!(below.tax, Money::ZERO);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::ProgramCategory;
use crate::money::Money;
use crate::rate_card::RateCard;

/// Per-student invoice split for one program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialLineItem {
    pub program: ProgramCategory,

    pub price_per_student: Money,

    /// Untaxed portion, capped at the program's book ceiling
    pub book_price: Money,

    /// Taxable residual above the ceiling
    pub service_fee: Money,

    /// `service_fee × tax_rate` in whole currency units, ties to even
    pub tax: Money,
}

/// Split a per-student price into book price, service fee and tax.
pub fn split(program: ProgramCategory, price_per_student: Money, rates: &RateCard) -> CommercialLineItem {
    let ceiling = rates.book_ceiling.get(program);

    if price_per_student <= ceiling {
        return CommercialLineItem {
            program,
            price_per_student,
            book_price: price_per_student,
            service_fee: Money::ZERO,
            tax: Money::ZERO,
        };
    }

    let service_fee = price_per_student - ceiling;
    let tax = Money((service_fee.0 * rates.tax_rate).round_ties_even());

    CommercialLineItem {
        program,
        price_per_student,
        book_price: ceiling,
        service_fee,
        tax,
    }
}

/// A line item scaled to a program's enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramCommercialTotals {
    pub item: CommercialLineItem,
    pub student_count: u32,
    pub book_total: Money,
    pub service_fee_total: Money,
    pub tax_total: Money,
}

/// Invoice totals across all programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialSummary {
    pub programs: Vec<ProgramCommercialTotals>,
    pub total_book: Money,
    pub total_service_fee: Money,
    pub total_tax: Money,
}

impl CommercialSummary {
    /// Book plus service fee plus tax
    pub fn invoice_total(&self) -> Money {
        self.total_book + self.total_service_fee + self.total_tax
    }
}

/// Multiply each per-student line by its enrollment and sum.
pub fn summarize(lines: impl IntoIterator<Item = (CommercialLineItem, u32)>) -> CommercialSummary {
    let programs: Vec<ProgramCommercialTotals> = lines
        .into_iter()
        .map(|(item, student_count)| {
            let n = f64::from(student_count);
            ProgramCommercialTotals {
                book_total: item.book_price * n,
                service_fee_total: item.service_fee * n,
                tax_total: item.tax * n,
                item,
                student_count,
            }
        })
        .collect();

    CommercialSummary {
        total_book: programs.iter().map(|p| p.book_total).sum(),
        total_service_fee: programs.iter().map(|p| p.service_fee_total).sum(),
        total_tax: programs.iter().map(|p| p.tax_total).sum(),
        programs,
    }
}
