pub mod attendance;

pub mod exams;

pub mod fees;

pub mod results;

pub use attendance::configure_attendance_routes;
pub use exams::configure_exams_routes;
pub use fees::configure_fees_routes;
pub use results::configure_results_routes;
