//! Teacher storage operations

use super::SeaOrmStorage;
use crate::entity::teachers::{Column, Entity as Teachers};
use crate::errors::{Result, SimsError};
use crate::models::users::entities::TeacherAssignments;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl SeaOrmStorage {
    pub async fn get_teacher_assignments_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<TeacherAssignments>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("teacher lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_assignments()))
    }
}
