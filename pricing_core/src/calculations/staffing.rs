//! # Staffing Allocation
//!
//! Converts a section count into a mix of full-time teachers and
//! variable-teacher days, plus the variable days needed to cover
//! full-time absenteeism.
//!
//! ## Regimes
//!
//! With the default rate card (`full_time_threshold_sections = 20`,
//! `section_block_size = 5`, `absence_rate_percent = 10`,
//! `weekly_session_multiplier = 35`):
//!
//! | Sections | Full-time | Variable days | Absence days |
//! |----------|-----------|---------------|--------------|
//! | < 20 | 0 | ceil(sections / 5) | 0 |
//! | ≥ 20, remainder 0 | sections / max | 0 | from full-time load |
//! | ≥ 20, remainder 1..19 | sections / max | ceil(remainder / 5) | from full-time load |
//! | ≥ 20, remainder ≥ 20 | sections / max + 1 | 0 | from full-time load |
//!
//! Absence days: `ceil(ceil(ft × max × 35 × 10 / 100) / 5)`.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::staffing::{allocate, StaffingRegime};
//! use pricing_core::rate_card::RateCard;
//!
//! let plan = allocate(27, 27, &RateCard::default()).unwrap();
//! assert_eq!(plan.regime, StaffingRegime::FullTime);
//! assert_eq!(plan.full_time_teachers, 1);
//! assert_eq!(plan.variable_teacher_days, 0);
//! assert_eq!(plan.absent_sessions, 95);
//! assert_eq!(plan.absence_coverage_days, 19);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{PricingError, PricingResult};
use crate::rate_card::RateCard;

/// Which staffing branch produced a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffingRegime {
    /// Below the full-time threshold: variable teachers only
    VariableOnly,
    /// Full-time teachers, remainder covered by variable days
    FullTime,
    /// Remainder large enough that one more full-time teacher was added
    FullTimeRoundedUp,
}

/// Staffing derived for one program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffingPlan {
    /// Sections to be taught
    pub sections: u32,

    /// Section capacity of one full-time teacher under the school schedule
    pub max_sections_per_teacher: u32,

    pub regime: StaffingRegime,

    pub full_time_teachers: u32,

    /// Weekly instructional days covered by variable teachers
    pub variable_teacher_days: u32,

    /// Sessions full-time teachers deliver over the cycle
    pub full_time_session_load: u64,

    /// Expected sessions lost to full-time absenteeism
    pub absent_sessions: u64,

    /// Extra variable-teacher days covering `absent_sessions`
    pub absence_coverage_days: u32,
}

impl StaffingPlan {
    /// All variable-teacher days the program pays for
    pub fn total_variable_days(&self) -> u32 {
        self.variable_teacher_days + self.absence_coverage_days
    }

    /// Sections the plan can carry in a week
    pub fn section_capacity(&self, section_block_size: u32) -> u32 {
        self.full_time_teachers * self.max_sections_per_teacher
            + self.variable_teacher_days * section_block_size
    }
}

/// Allocate teachers for `sections` under a schedule's per-teacher capacity.
///
/// # Returns
///
/// * `Ok(StaffingPlan)` - Coverage satisfied by construction
/// * `Err(PricingError::InvalidInput)` - Zero sections or zero capacity
pub fn allocate(sections: u32, max_sections_per_teacher: u32, rates: &RateCard) -> PricingResult<StaffingPlan> {
    if sections == 0 {
        return Err(PricingError::invalid_input("sections", "0", "Section count must be positive"));
    }
    if max_sections_per_teacher == 0 {
        return Err(PricingError::invalid_input(
            "max_sections_per_teacher",
            "0",
            "Teacher capacity must be positive",
        ));
    }

    let block = rates.section_block_size;
    let threshold = rates.full_time_threshold_sections;

    if sections < threshold {
        let plan = StaffingPlan {
            sections,
            max_sections_per_teacher,
            regime: StaffingRegime::VariableOnly,
            full_time_teachers: 0,
            variable_teacher_days: sections.div_ceil(block),
            full_time_session_load: 0,
            absent_sessions: 0,
            absence_coverage_days: 0,
        };
        debug!(sections, variable_days = plan.variable_teacher_days, "variable-only staffing");
        return Ok(plan);
    }

    let mut full_time_teachers = sections / max_sections_per_teacher;
    let remaining = sections % max_sections_per_teacher;

    let (regime, variable_teacher_days) = if remaining >= threshold {
        full_time_teachers += 1;
        (StaffingRegime::FullTimeRoundedUp, 0)
    } else {
        // remaining == 0 yields zero days
        (StaffingRegime::FullTime, remaining.div_ceil(block))
    };

    let full_time_session_load = u64::from(full_time_teachers)
        * u64::from(max_sections_per_teacher)
        * u64::from(rates.weekly_session_multiplier);
    let absent_sessions = (full_time_session_load * u64::from(rates.absence_rate_percent)).div_ceil(100);
    let absence_coverage_days = absent_sessions.div_ceil(u64::from(block));
    let absence_coverage_days = u32::try_from(absence_coverage_days).map_err(|_| {
        PricingError::invalid_input(
            "sections",
            sections.to_string(),
            "Absence coverage exceeds representable range",
        )
    })?;

    debug!(
        sections,
        full_time_teachers,
        remaining,
        variable_days = variable_teacher_days,
        absence_days = absence_coverage_days,
        ?regime,
        "full-time staffing"
    );

    Ok(StaffingPlan {
        sections,
        max_sections_per_teacher,
        regime,
        full_time_teachers,
        variable_teacher_days,
        full_time_session_load,
        absent_sessions,
        absence_coverage_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RateCard {
        RateCard::default()
    }

    #[test]
    fn test_small_regime_boundary() {
        let plan = allocate(19, 27, &rates()).unwrap();
        assert_eq!(plan.regime, StaffingRegime::VariableOnly);
        assert_eq!(plan.full_time_teachers, 0);
        assert_eq!(plan.variable_teacher_days, 4);
        assert_eq!(plan.absence_coverage_days, 0);
    }

    #[test]
    fn test_single_section() {
        let plan = allocate(1, 27, &rates()).unwrap();
        assert_eq!(plan.variable_teacher_days, 1);
        assert_eq!(plan.total_variable_days(), 1);
    }

    #[test]
    fn test_exact_fit_with_absence_coverage() {
        let plan = allocate(27, 27, &rates()).unwrap();
        assert_eq!(plan.full_time_teachers, 1);
        assert_eq!(plan.variable_teacher_days, 0);
        assert_eq!(plan.full_time_session_load, 945);
        assert_eq!(plan.absent_sessions, 95);
        assert_eq!(plan.absence_coverage_days, 19);
    }

    #[test]
    fn test_remainder_round_up() {
        // 48 = 1 × 27 + 21, and 21 ≥ 20
        let plan = allocate(48, 27, &rates()).unwrap();
        assert_eq!(plan.regime, StaffingRegime::FullTimeRoundedUp);
        assert_eq!(plan.full_time_teachers, 2);
        assert_eq!(plan.variable_teacher_days, 0);
        // 2 × 27 × 35 = 1890 sessions, 189 absent, 38 days
        assert_eq!(plan.full_time_session_load, 1890);
        assert_eq!(plan.absent_sessions, 189);
        assert_eq!(plan.absence_coverage_days, 38);
    }

    #[test]
    fn test_threshold_below_capacity_rounds_up() {
        // 20 sections on a 5-day week: floor(20/27) = 0, remainder 20
        let plan = allocate(20, 27, &rates()).unwrap();
        assert_eq!(plan.regime, StaffingRegime::FullTimeRoundedUp);
        assert_eq!(plan.full_time_teachers, 1);
        assert_eq!(plan.variable_teacher_days, 0);
        assert_eq!(plan.absence_coverage_days, 19);
    }

    #[test]
    fn test_small_remainder_uses_variable_days() {
        // 35 = 1 × 27 + 8
        let plan = allocate(35, 27, &rates()).unwrap();
        assert_eq!(plan.regime, StaffingRegime::FullTime);
        assert_eq!(plan.full_time_teachers, 1);
        assert_eq!(plan.variable_teacher_days, 2);
        assert_eq!(plan.absence_coverage_days, 19);
        assert_eq!(plan.total_variable_days(), 21);
    }

    #[test]
    fn test_six_day_schedule() {
        // 70 = 2 × 32 + 6
        let plan = allocate(70, 32, &rates()).unwrap();
        assert_eq!(plan.full_time_teachers, 2);
        assert_eq!(plan.variable_teacher_days, 2);
        // 2 × 32 × 35 = 2240, 224 absent, 45 days
        assert_eq!(plan.absent_sessions, 224);
        assert_eq!(plan.absence_coverage_days, 45);
    }

    #[test]
    fn test_coverage_satisfied() {
        let r = rates();
        for max in [27, 32] {
            for sections in 1..=200 {
                let plan = allocate(sections, max, &r).unwrap();
                assert!(
                    plan.section_capacity(r.section_block_size) >= sections,
                    "sections={} max={} plan={:?}",
                    sections,
                    max,
                    plan
                );
            }
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(allocate(0, 27, &rates()).is_err());
        assert!(allocate(10, 0, &rates()).is_err());
    }
}
