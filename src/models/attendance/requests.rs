use serde::Deserialize;

use super::entities::AttendanceEntry;

// Daily sheet lookup
#[derive(Debug, Clone, Deserialize)]
pub struct DailyAttendanceQuery {
    pub class_id: i64,
    pub date: chrono::NaiveDate,
}

// Daily sheet submission (creates or replaces the day's records)
#[derive(Debug, Deserialize)]
pub struct SubmitDailyAttendanceRequest {
    pub class_id: i64,
    pub date: chrono::NaiveDate,
    pub records: Vec<AttendanceEntry>,
}
