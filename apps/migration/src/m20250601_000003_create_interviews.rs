use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Interviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Interviews::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Interviews::UserId).uuid().not_null())
                    .col(ColumnDef::new(Interviews::Role).string().not_null())
                    .col(ColumnDef::new(Interviews::InterviewType).string().not_null())
                    .col(ColumnDef::new(Interviews::Level).string().not_null())
                    .col(ColumnDef::new(Interviews::Questions).json_binary().not_null())
                    .col(ColumnDef::new(Interviews::Answers).json_binary().not_null())
                    .col(ColumnDef::new(Interviews::Feedback).json_binary().not_null())
                    .col(
                        ColumnDef::new(Interviews::Finalized)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Interviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Interviews::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_interviews_user_id")
                            .from(Interviews::Table, Interviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_interviews_user_id")
                    .table(Interviews::Table)
                    .col(Interviews::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Interviews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Interviews {
    Table,
    Id,
    UserId,
    Role,
    InterviewType,
    Level,
    Questions,
    Answers,
    Feedback,
    Finalized,
    CreatedAt,
    UpdatedAt,
}
