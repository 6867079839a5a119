//! # pricing_core - Partnership Pricing Engine
//!
//! `pricing_core` quotes multi-program school partnerships. Given enrollment
//! per program, it works out sections, a full-time / variable staffing plan
//! (including absence coverage), delivery cost, a margin-based price with an
//! optional discount, the quote-level gross-margin gate, and the
//! book-price / service-fee / tax split used for invoicing.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Every stage is a pure function over immutable inputs
//! - **Configured, not hard-coded**: All rates live in one [`RateCard`]
//! - **JSON-First**: All inputs and outputs implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use pricing_core::{calculate_quote, ProgramCategory, ProgramRequest, QuoteRequest, RateCard};
//!
//! let request = QuoteRequest::new("Green Valley School", "rep@beyondskool.in", "office@greenvalley.edu")
//!     .with_discount(5)
//!     .with_program(ProgramRequest::new(ProgramCategory::Communication, 450, 30));
//!
//! let rates = RateCard::default();
//! let quote = calculate_quote(&request, &rates).unwrap();
//!
//! if quote.is_deliverable() {
//!     let invoice = quote.commercial_breakdown(&rates).unwrap();
//!     println!("Tax due: {}", invoice.total_tax);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The five pricing stages
//! - [`quote`] - Request validation and the end-to-end pipeline
//! - [`catalog`] - Program categories and school schedules
//! - [`rate_card`] - Consolidated rates and staffing constants
//! - [`payment`] - Payment terms and installment schedules
//! - [`money`] - Currency newtype with presentation rounding
//! - [`errors`] - Structured error types
//! - [`file_io`] - Rate card loading and saving

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod file_io;
pub mod money;
pub mod payment;
pub mod quote;
pub mod rate_card;

// Re-export commonly used types at crate root for convenience
pub use catalog::{ProgramCategory, SchoolSchedule};
pub use errors::{PricingError, PricingResult};
pub use file_io::{load_rate_card, save_rate_card};
pub use money::Money;
pub use payment::PaymentTerms;
pub use quote::{calculate_quote, ProgramQuote, ProgramRequest, Quote, QuoteRequest};
pub use rate_card::RateCard;
