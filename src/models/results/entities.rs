use serde::{Deserialize, Serialize};

/// A stored mark record.
///
/// New records carry the structured (subject, class, skill) triple; legacy
/// records may instead reference an exam (`exam_id`) and leave the triple
/// empty. `total` is derived, never authoritative from the caller, and
/// mirrors into `marks_obtained` for legacy consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub skill_id: Option<i64>,
    /// Legacy correlation key, kept for old records.
    pub exam_id: Option<i64>,
    pub midterm: i32,
    pub test: i32,
    #[serde(rename = "final")]
    pub final_exam: i32,
    pub total: i32,
    pub marks_obtained: Option<i32>,
    pub is_locked: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
