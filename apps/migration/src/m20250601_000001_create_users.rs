use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Rank).string().not_null())
                    .col(ColumnDef::new(Users::SkillsToTeach).json_binary().not_null())
                    .col(ColumnDef::new(Users::SkillsToLearn).json_binary().not_null())
                    .col(ColumnDef::new(Users::CurrentlyLearning).string().null())
                    .col(
                        ColumnDef::new(Users::IsFindingMatch)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::VerifyToken).string().null())
                    .col(
                        ColumnDef::new(Users::VerifyTokenExpires)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The matching query filters on the eligibility flag.
        manager
            .create_index(
                Index::create()
                    .name("idx_users_is_finding_match")
                    .table(Users::Table)
                    .col(Users::IsFindingMatch)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Rank,
    SkillsToTeach,
    SkillsToLearn,
    CurrentlyLearning,
    IsFindingMatch,
    IsVerified,
    VerifyToken,
    VerifyTokenExpires,
    CreatedAt,
    UpdatedAt,
}
