//! The result-visibility and locking policy core.
//!
//! Three cooperating pieces, all pure (no I/O):
//! - `visibility`: which result records a principal may see
//! - `gate`: whether a mutation (result write, attendance edit) is permitted
//! - `aggregate`: mark bounds and the derived total
//!
//! Services resolve the rows, exam statuses and fee states from storage, then
//! hand them to this module. Lock flags on students and results are only ever
//! interpreted here, never inspected directly by other components.

pub mod aggregate;
pub mod gate;
pub mod key;
pub mod visibility;

use serde::{Deserialize, Serialize};

use crate::models::exams::entities::ExamStatus;
use crate::models::results::entities::ResultRecord;

/// The exam a legacy result links to, reduced to what the policy needs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExamRef {
    pub skill_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub status: ExamStatus,
}

/// A result record joined with the context the policy evaluates against:
/// the resolved subject name (orphan guard), the student's class (legacy
/// class fallback and teacher scoping) and the linked exam for legacy rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultView {
    #[serde(flatten)]
    pub record: ResultRecord,
    pub subject_name: Option<String>,
    pub student_class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_exam: Option<ExamRef>,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn record(id: i64, student_id: i64) -> ResultRecord {
        ResultRecord {
            id,
            student_id,
            subject_id: None,
            class_id: None,
            skill_id: None,
            exam_id: None,
            midterm: 0,
            test: 0,
            final_exam: 0,
            total: 0,
            marks_obtained: None,
            is_locked: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    pub fn structured(id: i64, student_id: i64, skill: i64, class: i64, subject: i64) -> ResultView {
        let mut rec = record(id, student_id);
        rec.skill_id = Some(skill);
        rec.class_id = Some(class);
        rec.subject_id = Some(subject);
        ResultView {
            record: rec,
            subject_name: Some(format!("subject-{subject}")),
            student_class_id: Some(class),
            linked_exam: None,
        }
    }

    pub fn legacy(id: i64, student_id: i64, exam_id: i64, exam: ExamRef) -> ResultView {
        let mut rec = record(id, student_id);
        rec.exam_id = Some(exam_id);
        ResultView {
            record: rec,
            subject_name: Some(format!("subject-{}", exam.subject_id)),
            student_class_id: Some(exam.class_id),
            linked_exam: Some(exam),
        }
    }
}
