//! Mark aggregation: per-component bounds and the derived total.

use serde::{Deserialize, Serialize};

use super::gate::DenyReason;
use crate::models::results::requests::BulkResultEntry;

pub const MIDTERM_MAX: i32 = 40;
pub const TEST_MAX: i32 = 20;
pub const FINAL_MAX: i32 = 40;

/// The three mark components of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marks {
    pub midterm: i32,
    pub test: i32,
    #[serde(rename = "final")]
    pub final_exam: i32,
}

impl Marks {
    pub fn new(midterm: i32, test: i32, final_exam: i32) -> Self {
        Self {
            midterm,
            test,
            final_exam,
        }
    }

    /// Per-field bounds check. Violations are policy denials, not faults.
    pub fn validate(&self) -> Result<(), DenyReason> {
        if self.midterm < 0 || self.midterm > MIDTERM_MAX {
            return Err(DenyReason::InvalidMarks(format!(
                "midterm must be between 0 and {MIDTERM_MAX}, got {}",
                self.midterm
            )));
        }
        if self.test < 0 || self.test > TEST_MAX {
            return Err(DenyReason::InvalidMarks(format!(
                "test must be between 0 and {TEST_MAX}, got {}",
                self.test
            )));
        }
        if self.final_exam < 0 || self.final_exam > FINAL_MAX {
            return Err(DenyReason::InvalidMarks(format!(
                "final must be between 0 and {FINAL_MAX}, got {}",
                self.final_exam
            )));
        }
        Ok(())
    }

    /// The canonical total. Always recomputed, never trusted from callers.
    pub fn total(&self) -> i32 {
        self.midterm + self.test + self.final_exam
    }

    /// Value for the legacy `marks_obtained` mirror: synchronized whenever a
    /// non-zero total exists so pre-migration consumers keep working.
    pub fn legacy_mirror(&self) -> Option<i32> {
        let total = self.total();
        (total > 0).then_some(total)
    }
}

impl From<&BulkResultEntry> for Marks {
    fn from(entry: &BulkResultEntry) -> Self {
        Marks::new(entry.midterm, entry.test, entry.final_exam)
    }
}

/// Identity of a result for idempotent create-or-update. This is the business
/// key, not a surrogate exam id, so repeated consolidated-entry sessions
/// resubmit in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpsertKey {
    pub student_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub skill_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_sum_of_components() {
        let marks = Marks::new(35, 15, 35);
        assert_eq!(marks.total(), 85);
    }

    #[test]
    fn bounds_accept_maxima() {
        assert!(Marks::new(40, 20, 40).validate().is_ok());
        assert!(Marks::new(0, 0, 0).validate().is_ok());
    }

    #[test]
    fn midterm_over_cap_rejected() {
        let err = Marks::new(50, 0, 0).validate().unwrap_err();
        assert!(matches!(err, DenyReason::InvalidMarks(_)));
    }

    #[test]
    fn test_component_over_cap_rejected() {
        assert!(Marks::new(10, 21, 10).validate().is_err());
    }

    #[test]
    fn final_over_cap_rejected() {
        assert!(Marks::new(10, 10, 41).validate().is_err());
    }

    #[test]
    fn negative_marks_rejected() {
        assert!(Marks::new(-1, 0, 0).validate().is_err());
    }

    #[test]
    fn legacy_mirror_only_for_positive_totals() {
        assert_eq!(Marks::new(30, 10, 20).legacy_mirror(), Some(60));
        assert_eq!(Marks::new(0, 0, 0).legacy_mirror(), None);
    }
}
