//! # Delivery Cost
//!
//! Prices a staffing plan. Five terms, summed:
//!
//! - Teacher salary: `full_time_teachers × teacher_unit_cost[category]`
//! - Variable teachers: `(variable days + absence days) × daily_variable_rate × weekly_session_multiplier`
//! - Materials: `students × book_unit_cost`
//! - Kit: `kit_cost[category]` (STEM only with the default card)
//! - Overhead: `manager_overhead`, once per program

use serde::{Deserialize, Serialize};

use crate::calculations::staffing::StaffingPlan;
use crate::catalog::ProgramCategory;
use crate::money::Money;
use crate::rate_card::RateCard;

/// Cost of delivering one program.
///
/// ## JSON Example
///
/// ```json
/// {
///   "teacher_salary": 600000.0,
///   "variable_teachers": 997500.0,
///   "materials": 300000.0,
///   "kit": 100000.0,
///   "overhead": 200000.0,
///   "total": 2197500.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramCostBreakdown {
    pub teacher_salary: Money,
    /// Instructional and absence-coverage variable days together
    pub variable_teachers: Money,
    pub materials: Money,
    pub kit: Money,
    pub overhead: Money,
    pub total: Money,
}

/// Cost a program's staffing plan.
pub fn program_cost(
    program: ProgramCategory,
    student_count: u32,
    plan: &StaffingPlan,
    rates: &RateCard,
) -> ProgramCostBreakdown {
    let teacher_salary = rates.teacher_unit_cost.get(program) * f64::from(plan.full_time_teachers);

    let variable_teachers = rates.daily_variable_rate
        * f64::from(plan.total_variable_days())
        * f64::from(rates.weekly_session_multiplier);

    let materials = rates.book_unit_cost * f64::from(student_count);
    let kit = rates.kit_cost.get(program);
    let overhead = rates.manager_overhead;

    let total = teacher_salary + variable_teachers + materials + kit + overhead;

    ProgramCostBreakdown {
        teacher_salary,
        variable_teachers,
        materials,
        kit,
        overhead,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::staffing::allocate;

    #[test]
    fn test_stem_full_time_cost() {
        let rates = RateCard::default();
        let plan = allocate(20, 27, &rates).unwrap();
        let cost = program_cost(ProgramCategory::Stem, 600, &plan, &rates);

        assert_eq!(cost.teacher_salary, Money(600_000.0));
        // 19 absence days × 1500 × 35
        assert_eq!(cost.variable_teachers, Money(997_500.0));
        assert_eq!(cost.materials, Money(300_000.0));
        assert_eq!(cost.kit, Money(100_000.0));
        assert_eq!(cost.overhead, Money(200_000.0));
        assert_eq!(cost.total, Money(2_197_500.0));
    }

    #[test]
    fn test_non_stem_variable_only_cost() {
        let rates = RateCard::default();
        // 400 students / 40 = 10 sections, 2 variable days
        let plan = allocate(10, 27, &rates).unwrap();
        let cost = program_cost(ProgramCategory::Communication, 400, &plan, &rates);

        assert_eq!(cost.teacher_salary, Money::ZERO);
        assert_eq!(cost.variable_teachers, Money(105_000.0));
        assert_eq!(cost.materials, Money(200_000.0));
        assert_eq!(cost.kit, Money::ZERO);
        assert_eq!(cost.total, Money(505_000.0));
    }

    #[test]
    fn test_total_is_sum_of_terms() {
        let rates = RateCard::default();
        let plan = allocate(35, 27, &rates).unwrap();
        let cost = program_cost(ProgramCategory::FinancialLiteracy, 1_050, &plan, &rates);
        let sum = cost.teacher_salary + cost.variable_teachers + cost.materials + cost.kit + cost.overhead;
        assert!((cost.total.0 - sum.0).abs() < 1e-6);
        assert_eq!(cost.teacher_salary, Money(480_000.0));
    }

    #[test]
    fn test_rate_card_drives_cost() {
        let mut rates = RateCard::default();
        rates.manager_overhead = Money(0.0);
        rates.book_unit_cost = Money(0.0);
        let plan = allocate(5, 27, &rates).unwrap();
        let cost = program_cost(ProgramCategory::Communication, 100, &plan, &rates);
        // 1 variable day only
        assert_eq!(cost.total, Money(1_500.0 * 35.0));
    }
}
