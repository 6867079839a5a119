//! # Section Planning
//!
//! Turns an enrollment count into the number of sections (class groups)
//! that have to be taught.

use crate::errors::{PricingError, PricingResult};

/// Number of sections needed: `ceil(student_count / section_size)`.
///
/// # Example
///
/// ```rust
/// use pricing_core::calculations::sections::plan_sections;
///
/// assert_eq!(plan_sections(301, 30).unwrap(), 11);
/// assert_eq!(plan_sections(300, 30).unwrap(), 10);
/// ```
pub fn plan_sections(student_count: u32, section_size: u32) -> PricingResult<u32> {
    if student_count == 0 {
        return Err(PricingError::invalid_input(
            "student_count",
            "0",
            "Student count must be positive",
        ));
    }
    if section_size == 0 {
        return Err(PricingError::invalid_input(
            "section_size",
            "0",
            "Section size must be positive",
        ));
    }
    Ok(student_count.div_ceil(section_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_rounds_up() {
        assert_eq!(plan_sections(301, 30).unwrap(), 11);
        assert_eq!(plan_sections(1, 60).unwrap(), 1);
    }

    #[test]
    fn test_exact_fit() {
        assert_eq!(plan_sections(600, 30).unwrap(), 20);
    }

    #[test]
    fn test_zero_inputs_rejected() {
        assert_eq!(plan_sections(0, 30).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(plan_sections(30, 0).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
