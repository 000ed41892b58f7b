use serde::{Deserialize, Serialize};

use crate::policy::ResultView;

// Result listing envelope.
//
// `is_locked` is set when a student's global result lock suppressed the
// listing; the request still succeeds with an empty list (fail closed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultListResponse {
    pub results: Vec<ResultView>,
    pub is_locked: bool,
}

// One roster row for the consolidated-entry screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedStudentRow {
    pub student_id: i64,
    pub name: String,
    pub enrollment_no: String,
    pub has_unpaid_fees: bool,
    pub midterm: i32,
    pub test: i32,
    #[serde(rename = "final")]
    pub final_exam: i32,
    pub total: i32,
}

// Bulk submission outcome: saved rows plus the fee-gated students that were
// silently skipped (expected, not an error)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSubmitResponse {
    pub saved: usize,
    pub skipped_unpaid: Vec<i64>,
}
