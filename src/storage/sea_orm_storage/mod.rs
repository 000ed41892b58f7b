//! SeaORM storage implementation.
//!
//! One database layer for SQLite, PostgreSQL and MySQL.

mod attendance;
mod exams;
mod fees;
mod results;
mod students;
mod subjects;
mod teachers;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SimsError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| SimsError::database_operation(format!("migration failed: {e}")))?;

        info!("SeaORM storage ready, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite connection with WAL and pragma tuning
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SimsError::database_config(format!("bad SQLite URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SimsError::database_connection(format!("SQLite connect failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// PostgreSQL / MySQL connection
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SimsError::database_connection(format!("cannot reach database: {e}")))
    }

    /// Infer the database kind from the URL and normalize it
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SimsError::database_config(format!(
                "cannot infer database kind from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

// Storage trait implementation
use std::collections::{HashMap, HashSet};

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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // Users
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    // Students
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn list_students_by_class(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_class_impl(class_id).await
    }

    async fn list_students_by_class_and_skill(
        &self,
        class_id: i64,
        skill_id: i64,
    ) -> Result<Vec<Student>> {
        self.list_students_by_class_and_skill_impl(class_id, skill_id)
            .await
    }

    async fn student_class_map(&self, student_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        self.student_class_map_impl(student_ids).await
    }

    async fn set_student_lock(&self, student_id: i64, locked: bool) -> Result<Option<Student>> {
        self.set_student_lock_impl(student_id, locked).await
    }

    async fn set_all_student_locks(&self, locked: bool) -> Result<BulkUpdate> {
        self.set_all_student_locks_impl(locked).await
    }

    // Teachers
    async fn get_teacher_assignments_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherAssignments>> {
        self.get_teacher_assignments_by_user_id_impl(user_id).await
    }

    // Subjects
    async fn subject_name_map(&self) -> Result<HashMap<i64, String>> {
        self.subject_name_map_impl().await
    }

    // Exams
    async fn create_exam(&self, exam: CreateExamRequest) -> Result<Exam> {
        self.create_exam_impl(exam).await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn find_exam_by_triple(
        &self,
        skill_id: i64,
        class_id: i64,
        subject_id: i64,
    ) -> Result<Option<Exam>> {
        self.find_exam_by_triple_impl(skill_id, class_id, subject_id)
            .await
    }

    async fn list_exams(&self) -> Result<Vec<ExamWithSubject>> {
        self.list_exams_impl().await
    }

    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        self.update_exam_impl(id, update).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    async fn set_exam_status(&self, id: i64, status: ExamStatus) -> Result<Option<Exam>> {
        self.set_exam_status_impl(id, status).await
    }

    async fn set_all_exam_statuses(&self, status: ExamStatus) -> Result<BulkUpdate> {
        self.set_all_exam_statuses_impl(status).await
    }

    async fn list_closed_exam_triples(&self) -> Result<HashSet<(i64, i64, i64)>> {
        self.list_closed_exam_triples_impl().await
    }

    // Results
    async fn list_results(&self) -> Result<Vec<ResultRecord>> {
        self.list_results_impl().await
    }

    async fn get_result_by_id(&self, id: i64) -> Result<Option<ResultRecord>> {
        self.get_result_by_id_impl(id).await
    }

    async fn create_result(&self, result: CreateResultRequest) -> Result<ResultRecord> {
        self.create_result_impl(result).await
    }

    async fn update_result(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<ResultRecord>> {
        self.update_result_impl(id, update).await
    }

    async fn delete_result(&self, id: i64) -> Result<bool> {
        self.delete_result_impl(id).await
    }

    async fn upsert_result(&self, key: UpsertKey, marks: Marks) -> Result<(ResultRecord, bool)> {
        self.upsert_result_impl(key, marks).await
    }

    async fn find_results_by_triple(
        &self,
        skill_id: i64,
        class_id: i64,
        subject_id: i64,
    ) -> Result<Vec<ResultRecord>> {
        self.find_results_by_triple_impl(skill_id, class_id, subject_id)
            .await
    }

    // Attendance
    async fn find_attendance_by_class_and_date(
        &self,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceSheet>> {
        self.find_attendance_by_class_and_date_impl(class_id, date)
            .await
    }

    async fn create_attendance(
        &self,
        class_id: i64,
        batch_id: Option<i64>,
        date: NaiveDate,
        records: Vec<AttendanceEntry>,
    ) -> Result<AttendanceSheet> {
        self.create_attendance_impl(class_id, batch_id, date, records)
            .await
    }

    async fn update_attendance_records(
        &self,
        id: i64,
        records: Vec<AttendanceEntry>,
    ) -> Result<Option<AttendanceSheet>> {
        self.update_attendance_records_impl(id, records).await
    }

    // Fees
    async fn list_fees(
        &self,
        query: FeeQueryParams,
        restrict_to_student: Option<i64>,
    ) -> Result<Vec<Fee>> {
        self.list_fees_impl(query, restrict_to_student).await
    }

    async fn unpaid_student_ids(&self, student_ids: &[i64]) -> Result<HashSet<i64>> {
        self.unpaid_student_ids_impl(student_ids).await
    }
}
