use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Suggestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Suggestions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Suggestions::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Suggestions::SuggestedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Suggestions::Document).json().not_null())
                    .col(
                        ColumnDef::new(Suggestions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SuggestionMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SuggestionMembers::SuggestionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SuggestionMembers::UserId)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(SuggestionMembers::SuggestionId)
                            .col(SuggestionMembers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_suggestion_members_suggestion")
                            .from(SuggestionMembers::Table, SuggestionMembers::SuggestionId)
                            .to(Suggestions::Table, Suggestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_suggestion_members_user")
                    .table(SuggestionMembers::Table)
                    .col(SuggestionMembers::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SuggestionMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Suggestions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Suggestions {
    Table,
    Id,
    CreatedBy,
    SuggestedTime,
    Document,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SuggestionMembers {
    Table,
    SuggestionId,
    UserId,
}
