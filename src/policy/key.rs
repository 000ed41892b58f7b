//! Canonical identification of results across the legacy and structured
//! schemas.
//!
//! Old records key off an exam id; new records carry the
//! (skill, class, subject) triple directly. All filtering and gating goes
//! through the resolver here instead of special-casing legacy fields at each
//! call site.

use super::ResultView;
use crate::models::results::entities::ResultRecord;

/// How a stored result is identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKey {
    /// Pre-migration record, correlated through its exam.
    Legacy { exam_id: i64 },
    /// Structured record keyed by the full triple.
    Structured {
        skill_id: i64,
        class_id: i64,
        subject_id: i64,
    },
}

impl ResultKey {
    /// Classifies a record. Structured wins when the full triple is present;
    /// records with neither identification are data-quality orphans.
    pub fn of(record: &ResultRecord) -> Option<Self> {
        match (record.skill_id, record.class_id, record.subject_id) {
            (Some(skill_id), Some(class_id), Some(subject_id)) => Some(ResultKey::Structured {
                skill_id,
                class_id,
                subject_id,
            }),
            _ => record.exam_id.map(|exam_id| ResultKey::Legacy { exam_id }),
        }
    }
}

/// The canonical (skill, class, subject) context of a result, resolved from
/// the structured fields with legacy fallbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultContext {
    pub skill_id: Option<i64>,
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
}

impl ResultContext {
    /// Resolution order mirrors the stored data: skill and subject fall back
    /// to the linked exam, class falls back to the student's own class.
    pub fn resolve(view: &ResultView) -> Self {
        let exam = view.linked_exam.as_ref();
        ResultContext {
            skill_id: view.record.skill_id.or(exam.map(|e| e.skill_id)),
            class_id: view.record.class_id.or(view.student_class_id),
            subject_id: view.record.subject_id.or(exam.map(|e| e.subject_id)),
        }
    }

    /// The full triple, when every part resolved.
    pub fn triple(&self) -> Option<(i64, i64, i64)> {
        match (self.skill_id, self.class_id, self.subject_id) {
            (Some(s), Some(c), Some(j)) => Some((s, c, j)),
            _ => None,
        }
    }

    pub fn matches_subject(&self, subject_id: i64) -> bool {
        self.subject_id == Some(subject_id)
    }

    pub fn matches_class(&self, class_id: i64) -> bool {
        self.class_id == Some(class_id)
    }

    pub fn matches_skill(&self, skill_id: i64) -> bool {
        self.skill_id == Some(skill_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exams::entities::ExamStatus;
    use crate::policy::ExamRef;
    use crate::policy::test_support::{legacy, record, structured};

    #[test]
    fn structured_key_preferred_over_legacy() {
        let mut rec = record(1, 10);
        rec.skill_id = Some(1);
        rec.class_id = Some(2);
        rec.subject_id = Some(3);
        rec.exam_id = Some(99);
        assert_eq!(
            ResultKey::of(&rec),
            Some(ResultKey::Structured {
                skill_id: 1,
                class_id: 2,
                subject_id: 3
            })
        );
    }

    #[test]
    fn partial_triple_falls_back_to_legacy_key() {
        let mut rec = record(1, 10);
        rec.skill_id = Some(1);
        rec.exam_id = Some(99);
        assert_eq!(ResultKey::of(&rec), Some(ResultKey::Legacy { exam_id: 99 }));
    }

    #[test]
    fn orphan_record_has_no_key() {
        assert_eq!(ResultKey::of(&record(1, 10)), None);
    }

    #[test]
    fn context_resolves_from_linked_exam() {
        let exam = ExamRef {
            skill_id: 7,
            class_id: 8,
            subject_id: 9,
            status: ExamStatus::Open,
        };
        let view = legacy(1, 10, 99, exam);
        let ctx = ResultContext::resolve(&view);
        assert_eq!(ctx.triple(), Some((7, 8, 9)));
    }

    #[test]
    fn class_falls_back_to_student_class() {
        let mut view = structured(1, 10, 1, 2, 3);
        view.record.class_id = None;
        view.student_class_id = Some(5);
        let ctx = ResultContext::resolve(&view);
        assert_eq!(ctx.class_id, Some(5));
        assert!(ctx.matches_class(5));
        assert!(!ctx.matches_class(2));
    }
}
