//! Subject storage operations

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::subjects::{Column, Entity as Subjects};
use crate::errors::{Result, SimsError};
use sea_orm::{EntityTrait, QuerySelect};

impl SeaOrmStorage {
    pub async fn subject_name_map_impl(&self) -> Result<HashMap<i64, String>> {
        let rows: Vec<(i64, String)> = Subjects::find()
            .select_only()
            .column(Column::Id)
            .column(Column::Name)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("subject query failed: {e}")))?;

        Ok(rows.into_iter().collect())
    }
}
