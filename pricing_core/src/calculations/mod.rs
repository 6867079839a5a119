//! # Pricing Calculations
//!
//! The five engine stages, leaf first. Each is a pure function over
//! immutable inputs and a [`RateCard`](crate::rate_card::RateCard):
//!
//! - [`sections`] - enrollment to section count
//! - [`staffing`] - sections to full-time / variable staffing
//! - [`cost`] - staffing to delivery cost
//! - [`price`] - cost to discounted price, plus quote aggregation and margin gate
//! - [`commercial`] - per-student price to book price / service fee / tax
//!
//! [`crate::quote`] wires them together per program.

pub mod commercial;
pub mod cost;
pub mod price;
pub mod sections;
pub mod staffing;

// Re-export commonly used types
pub use commercial::{split, summarize, CommercialLineItem, CommercialSummary, ProgramCommercialTotals};
pub use cost::{program_cost, ProgramCostBreakdown};
pub use price::{aggregate, compose, ProgramPriceResult, QuoteAggregate, MAX_DISCOUNT_PERCENT};
pub use sections::plan_sections;
pub use staffing::{allocate, StaffingPlan, StaffingRegime};
