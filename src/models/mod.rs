pub mod attendance;
pub mod common;
pub mod exams;
pub mod fees;
pub mod results;
pub mod students;
pub mod users;

pub use common::bulk::BulkUpdate;
pub use common::response::ApiResponse;

/// Recorded once at process start, used for uptime reporting and startup
/// timing logs.
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// Wire-level response codes carried inside [`ApiResponse`].
///
/// Policy denials (42xx) are routine outcomes of policy evaluation, not
/// faults; they map to HTTP 403/400 at the route boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 4000,
    Unauthorized = 4010,
    Forbidden = 4030,
    NotFound = 4040,

    StudentNotFound = 4101,
    ExamNotFound = 4102,
    ResultNotFound = 4103,
    AttendanceNotFound = 4104,

    ClosedExam = 4201,
    AttendanceLocked = 4202,
    InvalidMarks = 4203,

    InternalServerError = 5000,
}
