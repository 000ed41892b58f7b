//! Fee storage operations

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::fees::{Column, Entity as Fees};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{Result, SimsError};
use crate::models::fees::{
    entities::{Fee, FeeStatus},
    requests::FeeQueryParams,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    pub async fn list_fees_impl(
        &self,
        query: FeeQueryParams,
        restrict_to_student: Option<i64>,
    ) -> Result<Vec<Fee>> {
        let mut select = Fees::find();

        if let Some(student_id) = restrict_to_student {
            select = select.filter(Column::StudentId.eq(student_id));
        } else if let Some(class_id) = query.class_id {
            // class filter goes through the student roster
            let student_ids: Vec<i64> = Students::find()
                .select_only()
                .column(StudentColumn::Id)
                .filter(StudentColumn::ClassId.eq(class_id))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    SimsError::database_operation(format!("class roster query failed: {e}"))
                })?;

            if student_ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::StudentId.is_in(student_ids));
        }

        if let Some(month) = query.month {
            select = select.filter(Column::Month.eq(month));
        }
        if let Some(year) = query.year {
            select = select.filter(Column::Year.eq(year));
        }
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let rows = select
            .order_by_desc(Column::Year)
            .order_by_desc(Column::Month)
            .all(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("fee listing failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_fee()).collect())
    }

    pub async fn unpaid_student_ids_impl(&self, student_ids: &[i64]) -> Result<HashSet<i64>> {
        if student_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows: Vec<i64> = Fees::find()
            .select_only()
            .column(Column::StudentId)
            .filter(Column::StudentId.is_in(student_ids.to_vec()))
            .filter(Column::Status.eq(FeeStatus::Pending.to_string()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("pending fee query failed: {e}")))?;

        Ok(rows.into_iter().collect())
    }
}
