//! User storage operations

use super::SeaOrmStorage;
use crate::entity::users::Entity as Users;
use crate::errors::{Result, SimsError};
use crate::models::users::entities::User;
use sea_orm::EntityTrait;

impl SeaOrmStorage {
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SimsError::database_operation(format!("user lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }
}
