use serde::{Deserialize, Serialize};

use super::entities::AttendanceEntry;

// Daily sheet as returned to callers.
//
// When no sheet exists yet, the class roster is returned with everyone marked
// Present and `is_new == true` so clients can start a fresh sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAttendanceResponse {
    pub id: Option<i64>,
    pub class_id: i64,
    pub batch_id: Option<i64>,
    pub date: chrono::NaiveDate,
    pub records: Vec<AttendanceEntry>,
    pub is_new: bool,
}
