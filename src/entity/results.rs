//! Result rows keep both addressing schemes: the structured
//! (skill, class, subject) triple for current data and the legacy exam_id
//! for rows imported from the old records system.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: Option<i64>,
    pub class_id: Option<i64>,
    pub skill_id: Option<i64>,
    pub exam_id: Option<i64>,
    pub midterm: i32,
    pub test: i32,
    pub final_exam: i32,
    pub total: i32,
    pub marks_obtained: Option<i32>,
    pub is_locked: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::exams::Entity",
        from = "Column::ExamId",
        to = "super::exams::Column::Id"
    )]
    Exam,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_result(self) -> crate::models::results::entities::ResultRecord {
        use crate::models::results::entities::ResultRecord;
        use chrono::{DateTime, Utc};

        ResultRecord {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            class_id: self.class_id,
            skill_id: self.skill_id,
            exam_id: self.exam_id,
            midterm: self.midterm,
            test: self.test,
            final_exam: self.final_exam,
            total: self.total,
            marks_obtained: self.marks_obtained,
            is_locked: self.is_locked,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
