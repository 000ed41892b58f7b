pub mod attendance;
pub mod exams;
pub mod fees;
pub mod results;

pub use attendance::AttendanceService;
pub use exams::ExamService;
pub use fees::FeeService;
pub use results::ResultService;
