//! Exam storage operations

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::prelude::Subjects;
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{Result, SimsError};
use crate::models::{
    BulkUpdate,
    exams::{
        entities::{Exam, ExamStatus, ExamWithSubject},
        requests::{CreateExamRequest, UpdateExamRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_exam_impl(&self, req: CreateExamRequest) -> Result<Exam> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            skill_id: Set(req.skill_id),
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
            date: Set(req.date.format("%Y-%m-%d").to_string()),
            exam_type: Set(req.exam_type.to_string()),
            status: Set(ExamStatus::Open.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("exam creation failed: {e}")))?;

        Ok(result.into_exam())
    }

    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("exam lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    pub async fn find_exam_by_triple_impl(
        &self,
        skill_id: i64,
        class_id: i64,
        subject_id: i64,
    ) -> Result<Option<Exam>> {
        let result = Exams::find()
            .filter(Column::SkillId.eq(skill_id))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::SubjectId.eq(subject_id))
            .one(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("exam lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    pub async fn list_exams_impl(&self) -> Result<Vec<ExamWithSubject>> {
        let rows = Exams::find()
            .find_also_related(Subjects)
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("exam listing failed: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(exam, subject)| ExamWithSubject {
                exam: exam.into_exam(),
                subject_name: subject.map(|s| s.name),
            })
            .collect())
    }

    pub async fn update_exam_impl(
        &self,
        id: i64,
        update: UpdateExamRequest,
    ) -> Result<Option<Exam>> {
        let existing = self.get_exam_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(skill_id) = update.skill_id {
            model.skill_id = Set(skill_id);
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(date) = update.date {
            model.date = Set(date.format("%Y-%m-%d").to_string());
        }
        if let Some(exam_type) = update.exam_type {
            model.exam_type = Set(exam_type.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("exam update failed: {e}")))?;

        self.get_exam_by_id_impl(id).await
    }

    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("exam deletion failed: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn set_exam_status_impl(
        &self,
        id: i64,
        status: ExamStatus,
    ) -> Result<Option<Exam>> {
        let existing = self.get_exam_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("exam status update failed: {e}")))?;

        self.get_exam_by_id_impl(id).await
    }

    pub async fn set_all_exam_statuses_impl(&self, status: ExamStatus) -> Result<BulkUpdate> {
        let matched = Exams::find()
            .count(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("exam count failed: {e}")))?;

        let result = Exams::update_many()
            .col_expr(Column::Status, Expr::value(status.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Status.ne(status.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("bulk status update failed: {e}")))?;

        Ok(BulkUpdate {
            matched,
            modified: result.rows_affected,
        })
    }

    pub async fn list_closed_exam_triples_impl(&self) -> Result<HashSet<(i64, i64, i64)>> {
        let rows: Vec<(i64, i64, i64)> = Exams::find()
            .select_only()
            .column(Column::SkillId)
            .column(Column::ClassId)
            .column(Column::SubjectId)
            .filter(Column::Status.eq(ExamStatus::Closed.to_string()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("closed exam query failed: {e}")))?;

        Ok(rows.into_iter().collect())
    }
}
