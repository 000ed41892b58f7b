//! Teacher rows carry their assignment sets as JSON arrays of ids. The sets
//! are small (a handful of classes/subjects per teacher) and always read as
//! a whole, so a join table buys nothing here.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub name: String,
    pub assigned_class_ids: String,
    pub assigned_subject_ids: String,
    pub assigned_skill_ids: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn parse_ids(raw: &str) -> Vec<i64> {
    serde_json::from_str(raw).unwrap_or_default()
}

impl Model {
    pub fn into_assignments(self) -> crate::models::users::entities::TeacherAssignments {
        crate::models::users::entities::TeacherAssignments {
            teacher_id: self.id,
            assigned_class_ids: parse_ids(&self.assigned_class_ids),
            assigned_subject_ids: parse_ids(&self.assigned_subject_ids),
            assigned_skill_ids: parse_ids(&self.assigned_skill_ids),
        }
    }
}
