//! Interview entity for SeaORM. Question/answer/feedback arrays are stored
//! as JSONB and stay index-aligned.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "interviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub interview_type: String,
    pub level: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub questions: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub answers: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub feedback: Json,
    pub finalized: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Interview.
impl From<Model> for quest_core::domain::Interview {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            role: model.role,
            interview_type: model.interview_type,
            level: model.level,
            questions: serde_json::from_value(model.questions).unwrap_or_default(),
            answers: serde_json::from_value(model.answers).unwrap_or_default(),
            feedback: serde_json::from_value(model.feedback).unwrap_or_default(),
            finalized: model.finalized,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Interview to SeaORM ActiveModel.
impl From<quest_core::domain::Interview> for ActiveModel {
    fn from(interview: quest_core::domain::Interview) -> Self {
        Self {
            id: Set(interview.id),
            user_id: Set(interview.user_id),
            role: Set(interview.role),
            interview_type: Set(interview.interview_type),
            level: Set(interview.level),
            questions: Set(serde_json::to_value(&interview.questions).unwrap_or_default()),
            answers: Set(serde_json::to_value(&interview.answers).unwrap_or_default()),
            feedback: Set(serde_json::to_value(&interview.feedback).unwrap_or_default()),
            finalized: Set(interview.finalized),
            created_at: Set(interview.created_at.into()),
            updated_at: Set(interview.updated_at.into()),
        }
    }
}
