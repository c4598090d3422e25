use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .string_len(24)
                            .not_null()
                            .primary_key(),
                    )
                    .col(text(Tasks::Title))
                    .col(text(Tasks::Description))
                    .col(text(Tasks::Priority))
                    .col(text(Tasks::Status))
                    .col(string_len(Tasks::AuthorId, 24))
                    .col(string_len(Tasks::ProjectId, 24))
                    .col(date(Tasks::CreatedAt))
                    .col(date(Tasks::DoneAt))
                    .to_owned(),
            )
            .await?;

        // `/users/{id}/tasks` and `/projects/{id}/tasks` filter on these
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_author_id")
                    .table(Tasks::Table)
                    .col(Tasks::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_project_id")
                    .table(Tasks::Table)
                    .col(Tasks::ProjectId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Priority,
    Status,
    AuthorId,
    ProjectId,
    CreatedAt,
    DoneAt,
}
