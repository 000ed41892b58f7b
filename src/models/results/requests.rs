use serde::Deserialize;

// Result listing filters (from the HTTP query string)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultQueryParams {
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub skill_id: Option<i64>,
}

// Create result request
//
// Either `exam_id` (legacy) or the structured triple identifies the governing
// exam; with neither present the exam defaults to Open.
#[derive(Debug, Deserialize)]
pub struct CreateResultRequest {
    pub student_id: i64,
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub skill_id: Option<i64>,
    pub exam_id: Option<i64>,
    #[serde(default)]
    pub midterm: i32,
    #[serde(default)]
    pub test: i32,
    #[serde(rename = "final", default)]
    pub final_exam: i32,
}

// Update result request
#[derive(Debug, Deserialize)]
pub struct UpdateResultRequest {
    pub midterm: Option<i32>,
    pub test: Option<i32>,
    #[serde(rename = "final")]
    pub final_exam: Option<i32>,
    pub is_locked: Option<bool>,
}

// Consolidated-entry roster query
#[derive(Debug, Clone, Deserialize)]
pub struct ConsolidatedQueryParams {
    pub skill_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
}

// One row of a consolidated mark submission
#[derive(Debug, Clone, Deserialize)]
pub struct BulkResultEntry {
    pub student_id: i64,
    #[serde(default)]
    pub midterm: i32,
    #[serde(default)]
    pub test: i32,
    #[serde(rename = "final", default)]
    pub final_exam: i32,
}

// Bulk mark submission for one (skill, class, subject) combination
#[derive(Debug, Deserialize)]
pub struct BulkSubmitResultsRequest {
    pub skill_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub results: Vec<BulkResultEntry>,
}

// Student result-lock toggle
#[derive(Debug, Deserialize)]
pub struct ToggleLockRequest {
    pub is_locked: bool,
}
