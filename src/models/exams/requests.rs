use serde::Deserialize;

use super::entities::{ExamStatus, ExamType};

// Create exam request
#[derive(Debug, Deserialize)]
pub struct CreateExamRequest {
    pub skill_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub date: chrono::NaiveDate,
    #[serde(rename = "type")]
    pub exam_type: ExamType,
}

// Update exam request
#[derive(Debug, Deserialize)]
pub struct UpdateExamRequest {
    pub skill_id: Option<i64>,
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub date: Option<chrono::NaiveDate>,
    #[serde(rename = "type")]
    pub exam_type: Option<ExamType>,
    pub status: Option<ExamStatus>,
}

// Bulk status request: force every exam to one status
#[derive(Debug, Deserialize)]
pub struct BulkExamStatusRequest {
    pub status: ExamStatus,
}
