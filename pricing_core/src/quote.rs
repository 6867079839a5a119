//! # Quote
//!
//! The request a school's enrollment is quoted from, and the quote the
//! engine returns. [`calculate_quote`] threads one immutable
//! [`QuoteRequest`] through every stage; nothing is stored between calls.
//!
//! ## Structure
//!
//! ```text
//! Quote
//! ├── id, created
//! ├── request: QuoteRequest (school, schedule, discount, programs, payment)
//! ├── programs: Vec<ProgramQuote> (request order)
//! │   └── staffing → cost → price
//! └── aggregate: QuoteAggregate (totals, gross margin, deliverable)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::catalog::{ProgramCategory, SchoolSchedule};
//! use pricing_core::quote::{calculate_quote, ProgramRequest, QuoteRequest};
//! use pricing_core::rate_card::RateCard;
//!
//! let request = QuoteRequest::new("Green Valley School", "rep@beyondskool.in", "office@greenvalley.edu")
//!     .with_schedule(SchoolSchedule::FiveDay)
//!     .with_program(ProgramRequest::new(ProgramCategory::Stem, 600, 30));
//!
//! let quote = calculate_quote(&request, &RateCard::default()).unwrap();
//! assert_eq!(quote.programs[0].staffing.full_time_teachers, 1);
//! assert_eq!(quote.aggregate.total_cost.rounded(), 2_197_500);
//! assert!(quote.is_deliverable());
//! ```

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculations::commercial::{split, summarize, CommercialSummary};
use crate::calculations::cost::{program_cost, ProgramCostBreakdown};
use crate::calculations::price::{aggregate, compose, ProgramPriceResult, QuoteAggregate, MAX_DISCOUNT_PERCENT};
use crate::calculations::sections::plan_sections;
use crate::calculations::staffing::{allocate, StaffingPlan};
use crate::catalog::{ProgramCategory, SchoolSchedule};
use crate::errors::{PricingError, PricingResult};
use crate::payment::PaymentTerms;
use crate::rate_card::RateCard;

/// Enrollment bounds accepted per program
pub const MIN_STUDENTS: u32 = 50;
pub const MAX_STUDENTS: u32 = 3000;

/// Section size bounds accepted per program
pub const MIN_SECTION_SIZE: u32 = 10;
pub const MAX_SECTION_SIZE: u32 = 60;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Who the quote is for and who prepared it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolContact {
    pub school_name: String,
    /// Partnerships representative preparing the quote
    pub prepared_by_email: String,
    pub school_email: String,
}

/// One program a school wants quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRequest {
    pub program: ProgramCategory,
    pub student_count: u32,
    pub section_size: u32,
}

impl ProgramRequest {
    pub fn new(program: ProgramCategory, student_count: u32, section_size: u32) -> Self {
        ProgramRequest {
            program,
            student_count,
            section_size,
        }
    }

    /// Validate enrollment and section size against the accepted bounds.
    pub fn validate(&self) -> PricingResult<()> {
        let field = |name: &str| format!("{}.{}", self.program.code(), name);

        if !(MIN_STUDENTS..=MAX_STUDENTS).contains(&self.student_count) {
            return Err(PricingError::invalid_input(
                field("student_count"),
                self.student_count.to_string(),
                format!("Student count must be between {} and {}", MIN_STUDENTS, MAX_STUDENTS),
            ));
        }
        if !(MIN_SECTION_SIZE..=MAX_SECTION_SIZE).contains(&self.section_size) {
            return Err(PricingError::invalid_input(
                field("section_size"),
                self.section_size.to_string(),
                format!(
                    "Section size must be between {} and {}",
                    MIN_SECTION_SIZE, MAX_SECTION_SIZE
                ),
            ));
        }
        Ok(())
    }
}

/// Everything needed to price one school's partnership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub contact: SchoolContact,
    pub schedule: SchoolSchedule,
    /// Whole percent, 0 to 40
    pub discount_percent: u32,
    /// Priced and reported in this order
    pub programs: Vec<ProgramRequest>,
    #[serde(default)]
    pub payment: PaymentTerms,
}

impl QuoteRequest {
    /// Start a request with no programs, a 5-day week, no discount and
    /// full payment in advance.
    pub fn new(
        school_name: impl Into<String>,
        prepared_by_email: impl Into<String>,
        school_email: impl Into<String>,
    ) -> Self {
        QuoteRequest {
            contact: SchoolContact {
                school_name: school_name.into(),
                prepared_by_email: prepared_by_email.into(),
                school_email: school_email.into(),
            },
            schedule: SchoolSchedule::default(),
            discount_percent: 0,
            programs: Vec::new(),
            payment: PaymentTerms::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: SchoolSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_discount(mut self, discount_percent: u32) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    pub fn with_program(mut self, program: ProgramRequest) -> Self {
        self.programs.push(program);
        self
    }

    pub fn with_payment(mut self, payment: PaymentTerms) -> Self {
        self.payment = payment;
        self
    }

    /// Validate the request before any pricing happens.
    ///
    /// Checks, in order: school name, both emails, at least one program,
    /// no program selected twice, per-program bounds, discount range and
    /// payment terms.
    pub fn validate(&self) -> PricingResult<()> {
        if self.contact.school_name.trim().is_empty() {
            return Err(PricingError::missing_field("school_name"));
        }
        check_email("prepared_by_email", &self.contact.prepared_by_email)?;
        check_email("school_email", &self.contact.school_email)?;

        if self.programs.is_empty() {
            return Err(PricingError::missing_field("programs"));
        }
        for (i, request) in self.programs.iter().enumerate() {
            if self.programs[..i].iter().any(|p| p.program == request.program) {
                return Err(PricingError::invalid_input(
                    "programs",
                    request.program.display_name(),
                    "Program selected more than once",
                ));
            }
            request.validate()?;
        }

        if self.discount_percent > MAX_DISCOUNT_PERCENT {
            return Err(PricingError::invalid_input(
                "discount_percent",
                self.discount_percent.to_string(),
                format!("Discount must be between 0 and {}", MAX_DISCOUNT_PERCENT),
            ));
        }

        self.payment.validate()
    }
}

fn check_email(field: &str, email: &str) -> PricingResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(PricingError::missing_field(field));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(PricingError::invalid_input(field, email, "Not a valid email address"));
    }
    Ok(())
}

/// Every stage's output for one program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramQuote {
    pub request: ProgramRequest,
    pub staffing: StaffingPlan,
    pub cost: ProgramCostBreakdown,
    pub price: ProgramPriceResult,
}

/// A computed quote. Returned even when it fails the margin gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub request: QuoteRequest,
    pub programs: Vec<ProgramQuote>,
    pub aggregate: QuoteAggregate,
}

impl Quote {
    /// Whether the quote clears the gross-margin gate and may be sent
    pub fn is_deliverable(&self) -> bool {
        self.aggregate.deliverable
    }

    /// Book price / service fee / tax split for the invoice.
    ///
    /// # Returns
    ///
    /// * `Err(PricingError::MarginBelowGate)` - Quote is not deliverable
    pub fn commercial_breakdown(&self, rates: &RateCard) -> PricingResult<CommercialSummary> {
        if !self.is_deliverable() {
            return Err(PricingError::MarginBelowGate {
                margin_percent: self.aggregate.gross_margin_percent,
                threshold_percent: self.aggregate.margin_gate_percent,
            });
        }
        Ok(summarize(self.programs.iter().map(|p| {
            (
                split(p.request.program, p.price.price_per_student, rates),
                p.request.student_count,
            )
        })))
    }
}

/// Price a single program through sections, staffing, cost and price.
pub fn quote_program(
    request: &ProgramRequest,
    schedule: SchoolSchedule,
    discount_percent: u32,
    rates: &RateCard,
) -> PricingResult<ProgramQuote> {
    let sections = plan_sections(request.student_count, request.section_size)?;
    let staffing = allocate(sections, schedule.max_sections_per_teacher(), rates)?;
    let cost = program_cost(request.program, request.student_count, &staffing, rates);
    let price = compose(cost.total, request.student_count, discount_percent, rates)?;

    debug!(
        program = request.program.code(),
        students = request.student_count,
        sections,
        total_cost = cost.total.0,
        final_price = price.final_price.0,
        "priced program"
    );

    Ok(ProgramQuote {
        request: request.clone(),
        staffing,
        cost,
        price,
    })
}

/// Validate a request and price every program in it.
///
/// A quote below the margin gate is still `Ok`; check
/// [`Quote::is_deliverable`] before producing an agreement.
///
/// # Returns
///
/// * `Ok(Quote)` - Per-program results in request order, plus the aggregate
/// * `Err(PricingError)` - Invalid request or rate card
pub fn calculate_quote(request: &QuoteRequest, rates: &RateCard) -> PricingResult<Quote> {
    rates.validate()?;
    request.validate()?;

    let programs = request
        .programs
        .iter()
        .map(|p| quote_program(p, request.schedule, request.discount_percent, rates))
        .collect::<PricingResult<Vec<_>>>()?;

    let prices: Vec<ProgramPriceResult> = programs.iter().map(|p| p.price.clone()).collect();
    let aggregate = aggregate(&prices, rates);

    if aggregate.deliverable {
        info!(
            school = %request.contact.school_name,
            margin = aggregate.gross_margin_percent,
            "quote clears margin gate"
        );
    } else {
        warn!(
            school = %request.contact.school_name,
            margin = aggregate.gross_margin_percent,
            gate = aggregate.margin_gate_percent,
            "quote below margin gate"
        );
    }

    Ok(Quote {
        id: Uuid::new_v4(),
        created: Utc::now(),
        request: request.clone(),
        programs,
        aggregate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Month;

    fn stem_request() -> QuoteRequest {
        QuoteRequest::new("Green Valley School", "rep@beyondskool.in", "office@greenvalley.edu")
            .with_program(ProgramRequest::new(ProgramCategory::Stem, 600, 30))
    }

    #[test]
    fn test_end_to_end_stem() {
        let rates = RateCard::default();
        let quote = calculate_quote(&stem_request(), &rates).unwrap();
        let stem = &quote.programs[0];

        assert_eq!(stem.staffing.sections, 20);
        assert_eq!(stem.staffing.full_time_teachers, 1);
        assert_eq!(stem.staffing.variable_teacher_days, 0);
        assert_eq!(stem.staffing.absence_coverage_days, 19);

        // 600,000 + 997,500 + 300,000 + 100,000 + 200,000
        assert_eq!(stem.cost.total, Money(2_197_500.0));
        assert!((stem.price.final_price.0 - 3_662_500.0).abs() < 1e-6);
        assert!((stem.price.price_per_student.0 - 6_104.166_666).abs() < 1e-3);

        assert!((quote.aggregate.gross_margin_percent - 40.0).abs() < 1e-9);
        assert!(quote.is_deliverable());
    }

    #[test]
    fn test_commercial_breakdown_for_deliverable_quote() {
        let rates = RateCard::default();
        let quote = calculate_quote(&stem_request(), &rates).unwrap();
        let summary = quote.commercial_breakdown(&rates).unwrap();

        assert_eq!(summary.programs.len(), 1);
        let line = &summary.programs[0].item;
        assert_eq!(line.book_price, Money(2_500.0));
        assert_eq!(line.tax, Money(649.0));
        assert_eq!(summary.total_book, Money(1_500_000.0));
        assert_eq!(summary.total_tax, Money(649.0 * 600.0));
    }

    #[test]
    fn test_margin_gate_failure_still_returns_numbers() {
        let rates = RateCard::default();
        let request = stem_request().with_discount(40);
        let quote = calculate_quote(&request, &rates).unwrap();

        assert!(!quote.is_deliverable());
        assert!(quote.aggregate.gross_margin_percent < 30.0);
        assert_eq!(quote.aggregate.total_cost, Money(2_197_500.0));

        let err = quote.commercial_breakdown(&rates).unwrap_err();
        assert_eq!(err.error_code(), "MARGIN_BELOW_GATE");
    }

    #[test]
    fn test_programs_reported_in_request_order() {
        let rates = RateCard::default();
        let request = QuoteRequest::new("Lakeside", "rep@beyondskool.in", "admin@lakeside.org")
            .with_schedule(SchoolSchedule::SixDay)
            .with_discount(10)
            .with_program(ProgramRequest::new(ProgramCategory::FinancialLiteracy, 400, 40))
            .with_program(ProgramRequest::new(ProgramCategory::Communication, 1_200, 30));
        let quote = calculate_quote(&request, &rates).unwrap();

        assert_eq!(quote.programs[0].request.program, ProgramCategory::FinancialLiteracy);
        assert_eq!(quote.programs[1].request.program, ProgramCategory::Communication);
        assert_eq!(quote.aggregate.total_students, 1_600);
        assert_eq!(quote.programs[1].staffing.max_sections_per_teacher, 32);

        let total: f64 = quote.programs.iter().map(|p| p.price.final_price.0).sum();
        assert!((quote.aggregate.total_final_price.0 - total).abs() < 1e-6);
    }

    #[test]
    fn test_validation_errors() {
        let rates = RateCard::default();

        let mut blank_name = stem_request();
        blank_name.contact.school_name = "   ".to_string();
        assert_eq!(
            calculate_quote(&blank_name, &rates).unwrap_err(),
            PricingError::missing_field("school_name")
        );

        let mut bad_email = stem_request();
        bad_email.contact.school_email = "office-at-school".to_string();
        assert_eq!(calculate_quote(&bad_email, &rates).unwrap_err().error_code(), "INVALID_INPUT");

        for address in ["a@b.c@d", "office @gv.edu", "office@gv.edu trailing"] {
            let mut loose = stem_request();
            loose.contact.prepared_by_email = address.to_string();
            assert_eq!(
                calculate_quote(&loose, &rates).unwrap_err().error_code(),
                "INVALID_INPUT",
                "{address} should be rejected"
            );
        }

        let no_programs = QuoteRequest::new("School", "a@b.co", "c@d.co");
        assert_eq!(
            calculate_quote(&no_programs, &rates).unwrap_err(),
            PricingError::missing_field("programs")
        );

        let duplicate = stem_request().with_program(ProgramRequest::new(ProgramCategory::Stem, 100, 20));
        assert!(calculate_quote(&duplicate, &rates).is_err());

        let too_few = QuoteRequest::new("School", "a@b.co", "c@d.co")
            .with_program(ProgramRequest::new(ProgramCategory::Communication, 10, 30));
        assert!(calculate_quote(&too_few, &rates).is_err());

        let big_discount = stem_request().with_discount(45);
        assert!(calculate_quote(&big_discount, &rates).is_err());
    }

    #[test]
    fn test_invalid_rate_card_rejected() {
        let rates = RateCard {
            target_margin_fraction: 1.2,
            ..RateCard::default()
        };
        assert_eq!(
            calculate_quote(&stem_request(), &rates).unwrap_err().error_code(),
            "INVALID_RATE_CARD"
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = stem_request().with_payment(PaymentTerms::Installments {
            months: vec![Month::April, Month::October],
        });
        let json = serde_json::to_string_pretty(&request).unwrap();
        assert!(json.contains("\"STEM\""));
        assert!(json.contains("5 days a week"));
        let roundtrip: QuoteRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, request);
    }

    #[test]
    fn test_payment_defaults_when_absent() {
        let json = r#"{
            "contact": {"school_name": "S", "prepared_by_email": "a@b.co", "school_email": "c@d.co"},
            "schedule": "6 days a week",
            "discount_percent": 5,
            "programs": [{"program": "Communication", "student_count": 200, "section_size": 25}]
        }"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.payment, PaymentTerms::default());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_same_input_same_numbers() {
        let rates = RateCard::default();
        let a = calculate_quote(&stem_request(), &rates).unwrap();
        let b = calculate_quote(&stem_request(), &rates).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.programs, b.programs);
        assert_eq!(a.aggregate, b.aggregate);
    }
}
