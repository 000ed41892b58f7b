pub use super::attendance::Entity as Attendance;
pub use super::exams::Entity as Exams;
pub use super::fees::Entity as Fees;
pub use super::results::Entity as Results;
pub use super::students::Entity as Students;
pub use super::subjects::Entity as Subjects;
pub use super::teachers::Entity as Teachers;
pub use super::users::Entity as Users;
