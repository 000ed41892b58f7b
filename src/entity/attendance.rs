//! One attendance sheet per (class, date); the per-student entries live in a
//! JSON column since they are always written and read as a whole roster.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub batch_id: Option<i64>,
    pub date: String,
    pub records: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_sheet(self) -> crate::models::attendance::entities::AttendanceSheet {
        use crate::models::attendance::entities::AttendanceSheet;
        use chrono::{DateTime, NaiveDate, Utc};

        AttendanceSheet {
            id: self.id,
            class_id: self.class_id,
            batch_id: self.batch_id,
            date: NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").unwrap_or_default(),
            records: serde_json::from_str(&self.records).unwrap_or_default(),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
