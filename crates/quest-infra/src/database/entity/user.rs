//! User entity for SeaORM. Skill sets are stored as JSONB arrays.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quest_core::domain::Rank;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub rank: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub skills_to_teach: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub skills_to_learn: Json,
    pub currently_learning: Option<String>,
    pub is_finding_match: bool,
    pub is_verified: bool,
    pub verify_token: Option<String>,
    pub verify_token_expires: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
    #[sea_orm(has_many = "super::interview::Entity")]
    Interviews,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::interview::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Interviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for quest_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            rank: Rank::parse(&model.rank).unwrap_or_default(),
            skills_to_teach: serde_json::from_value(model.skills_to_teach).unwrap_or_default(),
            skills_to_learn: serde_json::from_value(model.skills_to_learn).unwrap_or_default(),
            currently_learning: model.currently_learning,
            is_finding_match: model.is_finding_match,
            is_verified: model.is_verified,
            verify_token: model.verify_token,
            verify_token_expires: model.verify_token_expires.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<quest_core::domain::User> for ActiveModel {
    fn from(user: quest_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            rank: Set(user.rank.as_str().to_string()),
            skills_to_teach: Set(serde_json::to_value(&user.skills_to_teach).unwrap_or_default()),
            skills_to_learn: Set(serde_json::to_value(&user.skills_to_learn).unwrap_or_default()),
            currently_learning: Set(user.currently_learning),
            is_finding_match: Set(user.is_finding_match),
            is_verified: Set(user.is_verified),
            verify_token: Set(user.verify_token),
            verify_token_expires: Set(user.verify_token_expires.map(Into::into)),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
