//! Attendance storage operations

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::errors::{Result, SimsError};
use crate::models::attendance::entities::{AttendanceEntry, AttendanceSheet};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    pub async fn find_attendance_by_class_and_date_impl(
        &self,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceSheet>> {
        let result = Attendance::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Date.eq(date.format("%Y-%m-%d").to_string()))
            .one(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("attendance lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_sheet()))
    }

    pub async fn create_attendance_impl(
        &self,
        class_id: i64,
        batch_id: Option<i64>,
        date: NaiveDate,
        records: Vec<AttendanceEntry>,
    ) -> Result<AttendanceSheet> {
        let now = chrono::Utc::now().timestamp();
        let records = serde_json::to_string(&records)
            .map_err(|e| SimsError::serialization(format!("attendance roster encode: {e}")))?;

        let model = ActiveModel {
            class_id: Set(class_id),
            batch_id: Set(batch_id),
            date: Set(date.format("%Y-%m-%d").to_string()),
            records: Set(records),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("attendance creation failed: {e}")))?;

        Ok(result.into_sheet())
    }

    pub async fn update_attendance_records_impl(
        &self,
        id: i64,
        records: Vec<AttendanceEntry>,
    ) -> Result<Option<AttendanceSheet>> {
        let existing = Attendance::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("attendance lookup failed: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let records = serde_json::to_string(&records)
            .map_err(|e| SimsError::serialization(format!("attendance roster encode: {e}")))?;

        let model = ActiveModel {
            id: Set(id),
            records: Set(records),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("attendance update failed: {e}")))?;

        Ok(Some(updated.into_sheet()))
    }
}
