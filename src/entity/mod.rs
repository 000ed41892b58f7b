pub mod attendance;
pub mod exams;
pub mod fees;
pub mod prelude;
pub mod results;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;
