use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    BulkUpdate,
    attendance::entities::{AttendanceEntry, AttendanceSheet},
    exams::{
        entities::{Exam, ExamStatus, ExamWithSubject},
        requests::{CreateExamRequest, UpdateExamRequest},
    },
    fees::{entities::Fee, requests::FeeQueryParams},
    results::{
        entities::ResultRecord,
        requests::{CreateResultRequest, UpdateResultRequest},
    },
    students::entities::Student,
    users::entities::{TeacherAssignments, User},
};
use crate::policy::aggregate::{Marks, UpsertKey};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// User lookups
    // Fetch one user account
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Student records
    // Fetch one student row
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // Resolve the student row behind a user account
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    // Roster of a class (active students)
    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>>;
    // Roster of a class filtered to one skill track
    async fn list_students_by_class_and_skill(
        &self,
        class_id: i64,
        skill_id: i64,
    ) -> Result<Vec<Student>>;
    // student_id -> class_id for the given students
    async fn student_class_map(&self, student_ids: &[i64]) -> Result<HashMap<i64, i64>>;
    // Set the global result-visibility lock of one student
    async fn set_student_lock(&self, student_id: i64, locked: bool) -> Result<Option<Student>>;
    // Force the lock flag on every student, best effort
    async fn set_all_student_locks(&self, locked: bool) -> Result<BulkUpdate>;

    /// Teacher records
    // Assignment sets for the teacher behind a user account
    async fn get_teacher_assignments_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherAssignments>>;

    /// Subjects
    // subject_id -> name for every subject on file
    async fn subject_name_map(&self) -> Result<HashMap<i64, String>>;

    /// Exams
    // Create an exam
    async fn create_exam(&self, exam: CreateExamRequest) -> Result<Exam>;
    // Fetch one exam
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    // Exam governing a (skill, class, subject) combination, if any
    async fn find_exam_by_triple(
        &self,
        skill_id: i64,
        class_id: i64,
        subject_id: i64,
    ) -> Result<Option<Exam>>;
    // All exams joined with their subject name
    async fn list_exams(&self) -> Result<Vec<ExamWithSubject>>;
    // Update an exam
    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>>;
    // Delete an exam
    async fn delete_exam(&self, id: i64) -> Result<bool>;
    // Set the status of one exam
    async fn set_exam_status(&self, id: i64, status: ExamStatus) -> Result<Option<Exam>>;
    // Force every exam to one status, best effort
    async fn set_all_exam_statuses(&self, status: ExamStatus) -> Result<BulkUpdate>;
    // (skill, class, subject) combinations with at least one Closed exam
    async fn list_closed_exam_triples(&self) -> Result<HashSet<(i64, i64, i64)>>;

    /// Results
    // All result rows (visibility narrows them per request)
    async fn list_results(&self) -> Result<Vec<ResultRecord>>;
    // Fetch one result row
    async fn get_result_by_id(&self, id: i64) -> Result<Option<ResultRecord>>;
    // Create a result row (gating happens in the service layer)
    async fn create_result(&self, result: CreateResultRequest) -> Result<ResultRecord>;
    // Update mark components and/or the row lock
    async fn update_result(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<ResultRecord>>;
    // Delete a result row
    async fn delete_result(&self, id: i64) -> Result<bool>;
    // Create-or-update on the business key; `true` when a row was created
    async fn upsert_result(&self, key: UpsertKey, marks: Marks) -> Result<(ResultRecord, bool)>;
    // Existing results for a (skill, class, subject) combination
    async fn find_results_by_triple(
        &self,
        skill_id: i64,
        class_id: i64,
        subject_id: i64,
    ) -> Result<Vec<ResultRecord>>;

    /// Attendance
    // The sheet for a (class, date), if one was submitted
    async fn find_attendance_by_class_and_date(
        &self,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceSheet>>;
    // First submission for a (class, date)
    async fn create_attendance(
        &self,
        class_id: i64,
        batch_id: Option<i64>,
        date: NaiveDate,
        records: Vec<AttendanceEntry>,
    ) -> Result<AttendanceSheet>;
    // Replace the roster of an existing sheet
    async fn update_attendance_records(
        &self,
        id: i64,
        records: Vec<AttendanceEntry>,
    ) -> Result<Option<AttendanceSheet>>;

    /// Fees
    // Filtered fee listing; `restrict_to_student` pins the student scope
    async fn list_fees(
        &self,
        query: FeeQueryParams,
        restrict_to_student: Option<i64>,
    ) -> Result<Vec<Fee>>;
    // Which of the given students have any Pending fee
    async fn unpaid_student_ids(&self, student_ids: &[i64]) -> Result<HashSet<i64>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
