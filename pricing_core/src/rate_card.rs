//! # Rate Card
//!
//! Every rate, ceiling and staffing constant the engine uses, in one
//! auditable structure. Nothing in [`calculations`](crate::calculations)
//! hard-codes a number; each stage receives a `&RateCard`.
//!
//! ## Structure
//!
//! ```text
//! RateCard
//! ├── pricing:  target_margin_fraction, margin_gate_percent, tax_rate
//! ├── delivery: daily_variable_rate, weekly_session_multiplier,
//! │             book_unit_cost, manager_overhead
//! ├── staffing: section_block_size, full_time_threshold_sections,
//! │             absence_rate_percent
//! └── per program category: teacher_unit_cost, kit_cost, book_ceiling
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::catalog::ProgramCategory;
//! use pricing_core::rate_card::RateCard;
//!
//! let rates = RateCard::default();
//! assert_eq!(rates.target_margin_fraction, 0.4);
//! assert!(rates.teacher_unit_cost.get(ProgramCategory::Stem) > rates.teacher_unit_cost.get(ProgramCategory::Communication));
//! rates.validate().unwrap();
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::catalog::ProgramCategory;
use crate::errors::{PricingError, PricingResult};
use crate::money::Money;

/// Built-in rate card, shared by callers that do not load their own.
pub static DEFAULT_RATE_CARD: Lazy<RateCard> = Lazy::new(RateCard::default);

/// One value per program category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable<T> {
    pub communication: T,
    pub financial_literacy: T,
    pub stem: T,
}

impl<T: Copy> CategoryTable<T> {
    /// Table where STEM differs and the other categories share a value
    pub fn stem_and_standard(stem: T, standard: T) -> Self {
        CategoryTable {
            communication: standard,
            financial_literacy: standard,
            stem,
        }
    }

    pub fn get(&self, category: ProgramCategory) -> T {
        match category {
            ProgramCategory::Communication => self.communication,
            ProgramCategory::FinancialLiteracy => self.financial_literacy,
            ProgramCategory::Stem => self.stem,
        }
    }

    /// Iterate `(category, value)` pairs in catalog order
    pub fn entries(&self) -> impl Iterator<Item = (ProgramCategory, T)> + '_ {
        ProgramCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Consolidated pricing and staffing configuration.
///
/// Scalar fields come before the per-category tables so the TOML form
/// serializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    /// Margin baked into list price: base = cost / (1 - fraction)
    pub target_margin_fraction: f64,

    /// Minimum gross margin (percent) for a quote to be deliverable
    pub margin_gate_percent: f64,

    /// Tax rate applied to the service-fee portion of the price
    pub tax_rate: f64,

    /// Cost of one variable-teacher day, per week of the cycle
    pub daily_variable_rate: Money,

    /// Weekly sessions per section over a cycle; also the number of
    /// weeks variable-teacher days are paid for
    pub weekly_session_multiplier: u32,

    /// Book cost per student
    pub book_unit_cost: Money,

    /// Program-manager fee charged once per program
    pub manager_overhead: Money,

    /// Sections covered by one variable-teacher day, and sessions per
    /// absence-coverage day
    pub section_block_size: u32,

    /// Section count at which full-time staffing starts; a remainder this
    /// large is rounded up to one more full-time teacher
    pub full_time_threshold_sections: u32,

    /// Expected full-time teacher absenteeism, in percent
    pub absence_rate_percent: u32,

    /// Full-time teacher cost per teacher
    pub teacher_unit_cost: CategoryTable<Money>,

    /// Fixed kit cost per program
    pub kit_cost: CategoryTable<Money>,

    /// Per-student price classified as (untaxed) book price
    pub book_ceiling: CategoryTable<Money>,
}

impl Default for RateCard {
    fn default() -> Self {
        RateCard {
            target_margin_fraction: 0.4,
            margin_gate_percent: 30.0,
            tax_rate: 0.18,
            daily_variable_rate: Money(1_500.0),
            weekly_session_multiplier: 35,
            book_unit_cost: Money(500.0),
            manager_overhead: Money(200_000.0),
            section_block_size: 5,
            full_time_threshold_sections: 20,
            absence_rate_percent: 10,
            teacher_unit_cost: CategoryTable::stem_and_standard(Money(600_000.0), Money(480_000.0)),
            kit_cost: CategoryTable::stem_and_standard(Money(100_000.0), Money::ZERO),
            book_ceiling: CategoryTable::stem_and_standard(Money(2_500.0), Money(1_500.0)),
        }
    }
}

impl RateCard {
    /// Check that every value is usable by the engine.
    pub fn validate(&self) -> PricingResult<()> {
        if !(0.0..1.0).contains(&self.target_margin_fraction) {
            return Err(PricingError::invalid_rate_card(
                "target_margin_fraction",
                format!("{} must be in [0, 1)", self.target_margin_fraction),
            ));
        }
        if !(0.0..=100.0).contains(&self.margin_gate_percent) {
            return Err(PricingError::invalid_rate_card(
                "margin_gate_percent",
                format!("{} must be in [0, 100]", self.margin_gate_percent),
            ));
        }
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(PricingError::invalid_rate_card(
                "tax_rate",
                format!("{} must be in [0, 1]", self.tax_rate),
            ));
        }
        if self.weekly_session_multiplier == 0 {
            return Err(PricingError::invalid_rate_card(
                "weekly_session_multiplier",
                "must be positive",
            ));
        }
        if self.section_block_size == 0 {
            return Err(PricingError::invalid_rate_card("section_block_size", "must be positive"));
        }
        if self.full_time_threshold_sections == 0 {
            return Err(PricingError::invalid_rate_card(
                "full_time_threshold_sections",
                "must be positive",
            ));
        }
        if self.absence_rate_percent > 100 {
            return Err(PricingError::invalid_rate_card(
                "absence_rate_percent",
                format!("{} exceeds 100", self.absence_rate_percent),
            ));
        }

        let scalars = [
            ("daily_variable_rate", self.daily_variable_rate),
            ("book_unit_cost", self.book_unit_cost),
            ("manager_overhead", self.manager_overhead),
        ];
        for (field, amount) in scalars {
            check_amount(field, amount)?;
        }

        let tables = [
            ("teacher_unit_cost", &self.teacher_unit_cost),
            ("kit_cost", &self.kit_cost),
            ("book_ceiling", &self.book_ceiling),
        ];
        for (field, table) in tables {
            for (category, amount) in table.entries() {
                check_amount(&format!("{}.{}", field, category.code()), amount)?;
            }
        }

        Ok(())
    }
}

fn check_amount(field: &str, amount: Money) -> PricingResult<()> {
    if !amount.0.is_finite() || amount.0 < 0.0 {
        return Err(PricingError::invalid_rate_card(
            field,
            format!("{} must be a non-negative amount", amount.0),
        ));
    }
    Ok(())
}
