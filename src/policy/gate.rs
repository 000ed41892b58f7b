//! Lock/gate evaluation for result and attendance mutations.
//!
//! Gating here is exam-status and time-window based only. The student-level
//! result lock is a visibility concern (see `visibility`); it never blocks a
//! mutation.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::models::ErrorCode;
use crate::models::exams::entities::ExamStatus;
use crate::models::results::requests::BulkResultEntry;
use crate::models::users::entities::UserRole;
use crate::policy::aggregate::Marks;

/// Attendance sheets freeze for non-admins this long after creation.
pub const ATTENDANCE_EDIT_WINDOW_HOURS: i64 = 24;

/// Why a mutation or read was refused. These are routine policy outcomes
/// surfaced to the caller, not faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    ClosedExam,
    AttendanceLocked,
    InvalidMarks(String),
}

impl DenyReason {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            DenyReason::ClosedExam => ErrorCode::ClosedExam,
            DenyReason::AttendanceLocked => ErrorCode::AttendanceLocked,
            DenyReason::InvalidMarks(_) => ErrorCode::InvalidMarks,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DenyReason::ClosedExam => "Exam is closed".to_string(),
            DenyReason::AttendanceLocked => format!(
                "Attendance is locked after {ATTENDANCE_EDIT_WINDOW_HOURS} hours. Contact an admin to edit."
            ),
            DenyReason::InvalidMarks(detail) => format!("Invalid marks: {detail}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Deny(DenyReason),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }
}

/// Resolves the governing exam status: an explicit exam lookup wins over the
/// (skill, class, subject) lookup; with no exam on file the status defaults
/// to Open.
pub fn governing_status(
    by_exam_id: Option<ExamStatus>,
    by_triple: Option<ExamStatus>,
) -> ExamStatus {
    by_exam_id.or(by_triple).unwrap_or(ExamStatus::Open)
}

/// Creation gate: a closed governing exam denies every role.
pub fn can_create_result(governing: ExamStatus) -> GateDecision {
    match governing {
        ExamStatus::Open => GateDecision::Allow,
        ExamStatus::Closed => GateDecision::Deny(DenyReason::ClosedExam),
    }
}

/// Update gate: closed exams deny everyone except admins, who may still
/// repair existing results.
pub fn can_update_result(role: &UserRole, governing: ExamStatus) -> GateDecision {
    match governing {
        ExamStatus::Open => GateDecision::Allow,
        ExamStatus::Closed if *role == UserRole::Admin => GateDecision::Allow,
        ExamStatus::Closed => GateDecision::Deny(DenyReason::ClosedExam),
    }
}

/// Attendance edit gate: the sheet freezes for non-admins once the edit
/// window since `created_at` has elapsed. First creation of a sheet never
/// passes through here.
pub fn can_mutate_attendance(
    role: &UserRole,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> GateDecision {
    if *role == UserRole::Admin {
        return GateDecision::Allow;
    }
    // compare full durations, not whole hours: 24h30m is already locked
    let age = now.signed_duration_since(created_at);
    if age > Duration::hours(ATTENDANCE_EDIT_WINDOW_HOURS) {
        GateDecision::Deny(DenyReason::AttendanceLocked)
    } else {
        GateDecision::Allow
    }
}

/// Fee gate: splits a bulk submission into entries to persist and the
/// student ids skipped for unpaid fees. Skipping is silent and expected; a
/// partial batch is the correct outcome.
pub fn partition_unpaid(
    entries: Vec<BulkResultEntry>,
    unpaid_student_ids: &HashSet<i64>,
) -> (Vec<BulkResultEntry>, Vec<i64>) {
    let mut kept = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for entry in entries {
        if unpaid_student_ids.contains(&entry.student_id) {
            skipped.push(entry.student_id);
        } else {
            kept.push(entry);
        }
    }
    (kept, skipped)
}

/// Bulk bounds check: one invalid entry aborts the whole batch before any
/// write (transactional by convention).
pub fn validate_bulk_entries(entries: &[BulkResultEntry]) -> GateDecision {
    for entry in entries {
        if let Err(reason) = Marks::from(entry).validate() {
            return GateDecision::Deny(reason);
        }
    }
    GateDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(student_id: i64, midterm: i32, test: i32, final_exam: i32) -> BulkResultEntry {
        BulkResultEntry {
            student_id,
            midterm,
            test,
            final_exam,
        }
    }

    #[test]
    fn creation_denied_on_closed_exam_for_every_role() {
        // P2: no role exception on the creation path
        assert_eq!(
            can_create_result(ExamStatus::Closed),
            GateDecision::Deny(DenyReason::ClosedExam)
        );
        assert!(can_create_result(ExamStatus::Open).is_allowed());
    }

    #[test]
    fn admin_may_update_under_closed_exam_but_teacher_may_not() {
        // P3
        assert!(can_update_result(&UserRole::Admin, ExamStatus::Closed).is_allowed());
        assert_eq!(
            can_update_result(&UserRole::Teacher, ExamStatus::Closed),
            GateDecision::Deny(DenyReason::ClosedExam)
        );
        assert!(can_update_result(&UserRole::Teacher, ExamStatus::Open).is_allowed());
    }

    #[test]
    fn governing_status_prefers_explicit_exam() {
        assert_eq!(
            governing_status(Some(ExamStatus::Closed), Some(ExamStatus::Open)),
            ExamStatus::Closed
        );
        assert_eq!(
            governing_status(None, Some(ExamStatus::Closed)),
            ExamStatus::Closed
        );
        assert_eq!(governing_status(None, None), ExamStatus::Open);
    }

    #[test]
    fn attendance_locks_after_window_for_teacher_not_admin() {
        // P7: 25 hours old
        let now = Utc::now();
        let created = now - Duration::hours(25);
        assert_eq!(
            can_mutate_attendance(&UserRole::Teacher, created, now),
            GateDecision::Deny(DenyReason::AttendanceLocked)
        );
        assert!(can_mutate_attendance(&UserRole::Admin, created, now).is_allowed());
    }

    #[test]
    fn attendance_editable_within_window() {
        let now = Utc::now();
        let created = now - Duration::hours(23);
        assert!(can_mutate_attendance(&UserRole::Teacher, created, now).is_allowed());
    }

    #[test]
    fn attendance_window_counts_fractional_hours() {
        // 24h30m old locks for teachers even though the whole-hour count is 24
        let now = Utc::now();
        let created = now - Duration::hours(24) - Duration::minutes(30);
        assert_eq!(
            can_mutate_attendance(&UserRole::Teacher, created, now),
            GateDecision::Deny(DenyReason::AttendanceLocked)
        );
        assert!(can_mutate_attendance(&UserRole::Admin, created, now).is_allowed());
        // exactly at the boundary the sheet is still editable
        assert!(
            can_mutate_attendance(&UserRole::Teacher, now - Duration::hours(24), now).is_allowed()
        );
    }

    #[test]
    fn fee_gate_partitions_silently() {
        // P8: student 1 pending, student 2 paid
        let unpaid: HashSet<i64> = [1].into_iter().collect();
        let (kept, skipped) =
            partition_unpaid(vec![entry(1, 30, 10, 20), entry(2, 35, 15, 35)], &unpaid);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].student_id, 2);
        assert_eq!(skipped, vec![1]);
    }

    #[test]
    fn one_invalid_entry_aborts_the_batch() {
        let entries = vec![entry(1, 30, 10, 20), entry(2, 50, 0, 0)];
        assert!(matches!(
            validate_bulk_entries(&entries),
            GateDecision::Deny(DenyReason::InvalidMarks(_))
        ));
        assert!(validate_bulk_entries(&entries[..1]).is_allowed());
    }
}
