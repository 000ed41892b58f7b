//! Role-scoped result visibility.
//!
//! One explicit policy variant per role instead of ad-hoc per-role query
//! building. Rules narrow progressively; student reads fail closed (empty
//! list, never an error).

use std::collections::HashSet;

use super::ResultView;
use crate::models::exams::entities::ExamStatus;
use crate::models::results::requests::ResultQueryParams;
use crate::models::users::entities::{Principal, UserRole};
use crate::policy::key::ResultContext;

/// Visibility rules, shaped by the requesting role.
#[derive(Debug, Clone, PartialEq)]
pub enum VisibilityPolicy {
    /// Admins see everything, including orphaned records they may need to
    /// repair.
    Admin,
    /// Teachers see only their assigned classes, and only when the request
    /// is scoped to a single subject.
    Teacher { assigned_class_ids: Vec<i64> },
    /// Students see only their own rows, minus anything locked or governed
    /// by a closed exam.
    Student { student_id: i64, is_locked: bool },
}

/// Outcome of a visibility pass. `locked` flags the student global lock so
/// the response envelope can say why the list is empty.
#[derive(Debug, Clone, Default)]
pub struct VisibleResults {
    pub rows: Vec<ResultView>,
    pub locked: bool,
}

impl VisibilityPolicy {
    pub fn for_principal(principal: &Principal) -> Self {
        match principal.role {
            UserRole::Admin => VisibilityPolicy::Admin,
            UserRole::Teacher => VisibilityPolicy::Teacher {
                assigned_class_ids: principal.assigned_class_ids.clone(),
            },
            UserRole::Student => {
                let student = principal.student.as_ref();
                VisibilityPolicy::Student {
                    student_id: student.map(|s| s.student_id).unwrap_or(-1),
                    is_locked: student.map(|s| s.is_locked).unwrap_or(true),
                }
            }
        }
    }

    /// Applies the narrowing rules in order. `closed_exam_triples` is the set
    /// of (skill, class, subject) combinations with any Closed exam on file,
    /// used by the student final pass.
    pub fn apply(
        &self,
        rows: Vec<ResultView>,
        filters: &ResultQueryParams,
        closed_exam_triples: &HashSet<(i64, i64, i64)>,
    ) -> VisibleResults {
        // Rule 1: orphan-subject guard, admins exempt so they can repair
        let mut rows: Vec<ResultView> = match self {
            VisibilityPolicy::Admin => rows,
            _ => rows
                .into_iter()
                .filter(|r| r.subject_name.as_deref().is_some_and(|n| !n.is_empty()))
                .collect(),
        };

        // Rules 2 and 3: role scoping, short-circuiting where required
        match self {
            VisibilityPolicy::Admin => {}
            VisibilityPolicy::Teacher { assigned_class_ids } => {
                if filters.subject_id.is_none() {
                    return VisibleResults::default();
                }
                if assigned_class_ids.is_empty() {
                    return VisibleResults::default();
                }
                rows.retain(|r| {
                    r.student_class_id
                        .is_some_and(|c| assigned_class_ids.contains(&c))
                });
            }
            VisibilityPolicy::Student {
                student_id,
                is_locked,
            } => {
                if *is_locked {
                    return VisibleResults {
                        rows: Vec::new(),
                        locked: true,
                    };
                }
                rows.retain(|r| r.record.student_id == *student_id);
            }
        }

        // Rule 4: optional filters, each matching the structured field or
        // the legacy path
        if let Some(subject_id) = filters.subject_id {
            rows.retain(|r| ResultContext::resolve(r).matches_subject(subject_id));
        }
        if let Some(class_id) = filters.class_id {
            rows.retain(|r| ResultContext::resolve(r).matches_class(class_id));
        }
        if let Some(skill_id) = filters.skill_id {
            rows.retain(|r| ResultContext::resolve(r).matches_skill(skill_id));
        }

        // Rule 5: student-only final pass hiding closed-exam and locked rows
        if let VisibilityPolicy::Student { .. } = self {
            rows.retain(|r| {
                if r.record.is_locked {
                    return false;
                }
                if r.linked_exam
                    .is_some_and(|e| e.status == ExamStatus::Closed)
                {
                    return false;
                }
                match ResultContext::resolve(r).triple() {
                    Some(triple) => !closed_exam_triples.contains(&triple),
                    None => true,
                }
            });
        }

        VisibleResults { rows, locked: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ExamRef;
    use crate::policy::test_support::{legacy, structured};

    fn no_closed() -> HashSet<(i64, i64, i64)> {
        HashSet::new()
    }

    fn filters(subject: Option<i64>, class: Option<i64>, skill: Option<i64>) -> ResultQueryParams {
        ResultQueryParams {
            subject_id: subject,
            class_id: class,
            skill_id: skill,
        }
    }

    #[test]
    fn locked_student_fails_closed() {
        // P4: rows exist, response is empty and flagged, never an error
        let policy = VisibilityPolicy::Student {
            student_id: 10,
            is_locked: true,
        };
        let rows = vec![structured(1, 10, 1, 2, 3)];
        let visible = policy.apply(rows, &filters(None, None, None), &no_closed());
        assert!(visible.rows.is_empty());
        assert!(visible.locked);
    }

    #[test]
    fn student_sees_only_own_rows() {
        let policy = VisibilityPolicy::Student {
            student_id: 10,
            is_locked: false,
        };
        let rows = vec![structured(1, 10, 1, 2, 3), structured(2, 11, 1, 2, 3)];
        let visible = policy.apply(rows, &filters(None, None, None), &no_closed());
        assert_eq!(visible.rows.len(), 1);
        assert_eq!(visible.rows[0].record.student_id, 10);
        assert!(!visible.locked);
    }

    #[test]
    fn teacher_without_subject_filter_sees_nothing() {
        // P5, first half
        let policy = VisibilityPolicy::Teacher {
            assigned_class_ids: vec![2],
        };
        let rows = vec![structured(1, 10, 1, 2, 3)];
        let visible = policy.apply(rows, &filters(None, None, None), &no_closed());
        assert!(visible.rows.is_empty());
        assert!(!visible.locked);
    }

    #[test]
    fn teacher_without_assigned_classes_sees_nothing() {
        // P5, second half
        let policy = VisibilityPolicy::Teacher {
            assigned_class_ids: vec![],
        };
        let rows = vec![structured(1, 10, 1, 2, 3)];
        let visible = policy.apply(rows, &filters(Some(3), None, None), &no_closed());
        assert!(visible.rows.is_empty());
    }

    #[test]
    fn teacher_scoped_to_assigned_classes() {
        let policy = VisibilityPolicy::Teacher {
            assigned_class_ids: vec![2],
        };
        let rows = vec![
            structured(1, 10, 1, 2, 3), // student in class 2
            structured(2, 11, 1, 4, 3), // student in class 4
        ];
        let visible = policy.apply(rows, &filters(Some(3), None, None), &no_closed());
        assert_eq!(visible.rows.len(), 1);
        assert_eq!(visible.rows[0].record.id, 1);
    }

    #[test]
    fn orphan_subject_hidden_from_non_admins_only() {
        let mut orphan = structured(1, 10, 1, 2, 3);
        orphan.subject_name = None;

        let teacher = VisibilityPolicy::Teacher {
            assigned_class_ids: vec![2],
        };
        let visible = teacher.apply(vec![orphan.clone()], &filters(Some(3), None, None), &no_closed());
        assert!(visible.rows.is_empty());

        let admin = VisibilityPolicy::Admin;
        let visible = admin.apply(vec![orphan], &filters(None, None, None), &no_closed());
        assert_eq!(visible.rows.len(), 1);
    }

    #[test]
    fn subject_filter_matches_legacy_exam_path() {
        let exam = ExamRef {
            skill_id: 1,
            class_id: 2,
            subject_id: 3,
            status: ExamStatus::Open,
        };
        let rows = vec![legacy(1, 10, 99, exam), structured(2, 10, 1, 2, 4)];
        let admin = VisibilityPolicy::Admin;
        let visible = admin.apply(rows, &filters(Some(3), None, None), &no_closed());
        assert_eq!(visible.rows.len(), 1);
        assert_eq!(visible.rows[0].record.id, 1);
    }

    #[test]
    fn skill_and_class_filters_apply_independently() {
        let rows = vec![structured(1, 10, 1, 2, 3), structured(2, 11, 5, 6, 3)];
        let admin = VisibilityPolicy::Admin;
        let visible = admin.apply(rows.clone(), &filters(None, None, Some(5)), &no_closed());
        assert_eq!(visible.rows.len(), 1);
        assert_eq!(visible.rows[0].record.id, 2);

        let visible = admin.apply(rows, &filters(None, Some(2), None), &no_closed());
        assert_eq!(visible.rows.len(), 1);
        assert_eq!(visible.rows[0].record.id, 1);
    }

    #[test]
    fn student_final_pass_hides_closed_exam_triples() {
        let policy = VisibilityPolicy::Student {
            student_id: 10,
            is_locked: false,
        };
        let rows = vec![structured(1, 10, 1, 2, 3), structured(2, 10, 1, 2, 4)];
        let closed: HashSet<(i64, i64, i64)> = [(1, 2, 3)].into_iter().collect();
        let visible = policy.apply(rows, &filters(None, None, None), &closed);
        assert_eq!(visible.rows.len(), 1);
        assert_eq!(visible.rows[0].record.id, 2);
    }

    #[test]
    fn student_final_pass_hides_locked_and_closed_linked_rows() {
        let policy = VisibilityPolicy::Student {
            student_id: 10,
            is_locked: false,
        };
        let mut locked_row = structured(1, 10, 1, 2, 3);
        locked_row.record.is_locked = true;
        let closed_linked = legacy(
            2,
            10,
            99,
            ExamRef {
                skill_id: 1,
                class_id: 2,
                subject_id: 5,
                status: ExamStatus::Closed,
            },
        );
        let ok_row = structured(3, 10, 1, 2, 6);
        let visible = policy.apply(
            vec![locked_row, closed_linked, ok_row],
            &filters(None, None, None),
            &no_closed(),
        );
        assert_eq!(visible.rows.len(), 1);
        assert_eq!(visible.rows[0].record.id, 3);
    }

    #[test]
    fn closed_exams_do_not_hide_rows_from_staff() {
        let closed: HashSet<(i64, i64, i64)> = [(1, 2, 3)].into_iter().collect();
        let rows = vec![structured(1, 10, 1, 2, 3)];

        let admin = VisibilityPolicy::Admin;
        assert_eq!(
            admin
                .apply(rows.clone(), &filters(None, None, None), &closed)
                .rows
                .len(),
            1
        );

        let teacher = VisibilityPolicy::Teacher {
            assigned_class_ids: vec![2],
        };
        assert_eq!(
            teacher
                .apply(rows, &filters(Some(3), None, None), &closed)
                .rows
                .len(),
            1
        );
    }
}
