//! # Program Catalog
//!
//! The fixed set of programs a school can select, and the school attendance
//! regimes that decide how many sections one full-time teacher can carry.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::catalog::{ProgramCategory, SchoolSchedule};
//!
//! let program = ProgramCategory::from_str_flexible("financial literacy").unwrap();
//! assert_eq!(program, ProgramCategory::FinancialLiteracy);
//!
//! let schedule = SchoolSchedule::from_str_flexible("6 days a week").unwrap();
//! assert_eq!(schedule.max_sections_per_teacher(), 32);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{PricingError, PricingResult};

/// Programs offered to partner schools.
///
/// Serializes with the same labels the intake form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProgramCategory {
    #[serde(rename = "Communication")]
    Communication,
    #[serde(rename = "Financial Literacy")]
    FinancialLiteracy,
    /// Carries its own teacher rate, a kit cost and a higher book ceiling
    #[serde(rename = "STEM")]
    Stem,
}

impl ProgramCategory {
    /// All programs, in catalog order
    pub const ALL: [ProgramCategory; 3] = [
        ProgramCategory::Communication,
        ProgramCategory::FinancialLiteracy,
        ProgramCategory::Stem,
    ];

    /// Short code used on the command line (e.g., "comm", "fl", "stem")
    pub fn code(&self) -> &'static str {
        match self {
            ProgramCategory::Communication => "comm",
            ProgramCategory::FinancialLiteracy => "fl",
            ProgramCategory::Stem => "stem",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProgramCategory::Communication => "Communication",
            ProgramCategory::FinancialLiteracy => "Financial Literacy",
            ProgramCategory::Stem => "STEM",
        }
    }

    pub fn is_stem(&self) -> bool {
        matches!(self, ProgramCategory::Stem)
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> PricingResult<Self> {
        match s.trim().to_uppercase().replace([' ', '_'], "-").as_str() {
            "COMM" | "COMMUNICATION" => Ok(ProgramCategory::Communication),
            "FL" | "FINLIT" | "FINANCIAL-LITERACY" => Ok(ProgramCategory::FinancialLiteracy),
            "STEM" => Ok(ProgramCategory::Stem),
            _ => Err(PricingError::unknown_program(s)),
        }
    }
}

impl fmt::Display for ProgramCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// School attendance regime, shared by every program in one quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SchoolSchedule {
    #[default]
    #[serde(rename = "5 days a week")]
    FiveDay,
    #[serde(rename = "6 days a week")]
    SixDay,
}

impl SchoolSchedule {
    pub const ALL: [SchoolSchedule; 2] = [SchoolSchedule::FiveDay, SchoolSchedule::SixDay];

    /// Maximum weekly sections one full-time teacher can carry
    pub fn max_sections_per_teacher(&self) -> u32 {
        match self {
            SchoolSchedule::FiveDay => 27,
            SchoolSchedule::SixDay => 32,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SchoolSchedule::FiveDay => "5 days a week",
            SchoolSchedule::SixDay => "6 days a week",
        }
    }

    /// Parse "5", "five-day", "5 days a week", "6-day", ...
    pub fn from_str_flexible(s: &str) -> PricingResult<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "5" | "five" | "5 day" | "five day" | "5 days" | "5 days a week" => Ok(SchoolSchedule::FiveDay),
            "6" | "six" | "6 day" | "six day" | "6 days" | "6 days a week" => Ok(SchoolSchedule::SixDay),
            _ => Err(PricingError::unknown_schedule(s)),
        }
    }
}

impl fmt::Display for SchoolSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
