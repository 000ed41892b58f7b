//! Student storage operations

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SimsError};
use crate::models::{
    BulkUpdate,
    students::entities::{Student, StudentStatus},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("student lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("student lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn list_students_by_class_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        let rows = Students::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Status.eq(StudentStatus::Active.to_string()))
            .order_by_asc(Column::EnrollmentNo)
            .all(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("class roster query failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn list_students_by_class_and_skill_impl(
        &self,
        class_id: i64,
        skill_id: i64,
    ) -> Result<Vec<Student>> {
        let rows = Students::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::SkillId.eq(skill_id))
            .filter(Column::Status.eq(StudentStatus::Active.to_string()))
            .order_by_asc(Column::EnrollmentNo)
            .all(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("class roster query failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn student_class_map_impl(
        &self,
        student_ids: &[i64],
    ) -> Result<HashMap<i64, i64>> {
        if student_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = Students::find()
            .select_only()
            .column(Column::Id)
            .column(Column::ClassId)
            .filter(Column::Id.is_in(student_ids.to_vec()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("student class query failed: {e}")))?;

        Ok(rows.into_iter().collect())
    }

    pub async fn set_student_lock_impl(
        &self,
        student_id: i64,
        locked: bool,
    ) -> Result<Option<Student>> {
        let existing = self.get_student_by_id_impl(student_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(student_id),
            is_locked: Set(locked),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("student lock update failed: {e}")))?;

        self.get_student_by_id_impl(student_id).await
    }

    pub async fn set_all_student_locks_impl(&self, locked: bool) -> Result<BulkUpdate> {
        use sea_orm::{PaginatorTrait, sea_query::Expr};

        let matched = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("student count failed: {e}")))?;

        let result = Students::update_many()
            .col_expr(Column::IsLocked, Expr::value(locked))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::IsLocked.ne(locked))
            .exec(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("bulk lock update failed: {e}")))?;

        Ok(BulkUpdate {
            matched,
            modified: result.rows_affected,
        })
    }
}
