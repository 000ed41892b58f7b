//! Result storage operations

use super::SeaOrmStorage;
use crate::entity::results::{ActiveModel, Column, Entity as Results};
use crate::errors::{Result, SimsError};
use crate::models::results::{
    entities::ResultRecord,
    requests::{CreateResultRequest, UpdateResultRequest},
};
use crate::policy::aggregate::{Marks, UpsertKey};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn list_results_impl(&self) -> Result<Vec<ResultRecord>> {
        let rows = Results::find()
            .order_by_desc(Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("result listing failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_result()).collect())
    }

    pub async fn get_result_by_id_impl(&self, id: i64) -> Result<Option<ResultRecord>> {
        let result = Results::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("result lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_result()))
    }

    pub async fn create_result_impl(&self, req: CreateResultRequest) -> Result<ResultRecord> {
        let now = chrono::Utc::now().timestamp();
        let marks = Marks::new(req.midterm, req.test, req.final_exam);

        let model = ActiveModel {
            student_id: Set(req.student_id),
            subject_id: Set(req.subject_id),
            class_id: Set(req.class_id),
            skill_id: Set(req.skill_id),
            exam_id: Set(req.exam_id),
            midterm: Set(marks.midterm),
            test: Set(marks.test),
            final_exam: Set(marks.final_exam),
            total: Set(marks.total()),
            marks_obtained: Set(marks.legacy_mirror()),
            is_locked: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("result creation failed: {e}")))?;

        Ok(result.into_result())
    }

    pub async fn update_result_impl(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<ResultRecord>> {
        let Some(existing) = self.get_result_by_id_impl(id).await? else {
            return Ok(None);
        };

        // total and the legacy mirror are derived from the merged components,
        // never taken from the caller
        let marks = Marks::new(
            update.midterm.unwrap_or(existing.midterm),
            update.test.unwrap_or(existing.test),
            update.final_exam.unwrap_or(existing.final_exam),
        );

        let mut model = ActiveModel {
            id: Set(id),
            midterm: Set(marks.midterm),
            test: Set(marks.test),
            final_exam: Set(marks.final_exam),
            total: Set(marks.total()),
            marks_obtained: Set(marks.legacy_mirror()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(is_locked) = update.is_locked {
            model.is_locked = Set(is_locked);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("result update failed: {e}")))?;

        self.get_result_by_id_impl(id).await
    }

    pub async fn delete_result_impl(&self, id: i64) -> Result<bool> {
        let result = Results::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("result deletion failed: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// Find-then-write on the business key. Two concurrent submissions for the
    /// same key race to last-write-wins, which is the accepted model here.
    pub async fn upsert_result_impl(
        &self,
        key: UpsertKey,
        marks: Marks,
    ) -> Result<(ResultRecord, bool)> {
        let now = chrono::Utc::now().timestamp();

        let existing = Results::find()
            .filter(Column::StudentId.eq(key.student_id))
            .filter(Column::SubjectId.eq(key.subject_id))
            .filter(Column::ClassId.eq(key.class_id))
            .filter(Column::SkillId.eq(key.skill_id))
            .one(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("result lookup failed: {e}")))?;

        match existing {
            Some(row) => {
                let model = ActiveModel {
                    id: Set(row.id),
                    midterm: Set(marks.midterm),
                    test: Set(marks.test),
                    final_exam: Set(marks.final_exam),
                    total: Set(marks.total()),
                    marks_obtained: Set(marks.legacy_mirror()),
                    updated_at: Set(now),
                    ..Default::default()
                };

                let updated = model.update(&self.db).await.map_err(|e| {
                    SimsError::database_operation(format!("result update failed: {e}"))
                })?;

                Ok((updated.into_result(), false))
            }
            None => {
                let model = ActiveModel {
                    student_id: Set(key.student_id),
                    subject_id: Set(Some(key.subject_id)),
                    class_id: Set(Some(key.class_id)),
                    skill_id: Set(Some(key.skill_id)),
                    exam_id: Set(None),
                    midterm: Set(marks.midterm),
                    test: Set(marks.test),
                    final_exam: Set(marks.final_exam),
                    total: Set(marks.total()),
                    marks_obtained: Set(marks.legacy_mirror()),
                    is_locked: Set(false),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };

                let inserted = model.insert(&self.db).await.map_err(|e| {
                    SimsError::database_operation(format!("result creation failed: {e}"))
                })?;

                Ok((inserted.into_result(), true))
            }
        }
    }

    pub async fn find_results_by_triple_impl(
        &self,
        skill_id: i64,
        class_id: i64,
        subject_id: i64,
    ) -> Result<Vec<ResultRecord>> {
        let rows = Results::find()
            .filter(Column::SkillId.eq(skill_id))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::SubjectId.eq(subject_id))
            .all(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("result query failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_result()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{students, users};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    // single connection so the in-memory database is shared across queries
    async fn storage_with_student() -> (SeaOrmStorage, i64) {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.expect("sqlite connect");
        Migrator::up(&db, None).await.expect("migrations");

        let now = chrono::Utc::now().timestamp();
        let user = users::ActiveModel {
            username: Set("s.iqbal".to_string()),
            name: Set("Sana Iqbal".to_string()),
            role: Set("student".to_string()),
            status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("user insert");

        let student = students::ActiveModel {
            user_id: Set(user.id),
            enrollment_no: Set("EN-1001".to_string()),
            name: Set("Sana Iqbal".to_string()),
            class_id: Set(3),
            batch_id: Set(1),
            skill_id: Set(7),
            status: Set("active".to_string()),
            total_paid: Set(0.0),
            amount: Set(None),
            is_locked: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await
        .expect("student insert");

        (SeaOrmStorage { db }, student.id)
    }

    #[tokio::test]
    async fn repeated_submission_updates_in_place() {
        let (storage, student_id) = storage_with_student().await;
        let key = UpsertKey {
            student_id,
            subject_id: 11,
            class_id: 3,
            skill_id: 7,
        };

        let (first, created) = storage
            .upsert_result_impl(key, Marks::new(30, 10, 20))
            .await
            .expect("first submission");
        assert!(created);
        assert_eq!(first.total, 60);
        assert_eq!(first.marks_obtained, Some(60));

        let (second, created) = storage
            .upsert_result_impl(key, Marks::new(30, 10, 20))
            .await
            .expect("second submission");
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.total, 60);

        let all = storage.list_results_impl().await.expect("listing");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn resubmission_with_new_marks_replaces_components() {
        let (storage, student_id) = storage_with_student().await;
        let key = UpsertKey {
            student_id,
            subject_id: 11,
            class_id: 3,
            skill_id: 7,
        };

        let (first, _) = storage
            .upsert_result_impl(key, Marks::new(20, 5, 10))
            .await
            .expect("first submission");
        let (revised, created) = storage
            .upsert_result_impl(key, Marks::new(35, 15, 35))
            .await
            .expect("revised submission");

        assert!(!created);
        assert_eq!(revised.id, first.id);
        assert_eq!(revised.total, 85);
        assert_eq!(revised.marks_obtained, Some(85));
    }
}
