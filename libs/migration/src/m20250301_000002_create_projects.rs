use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .string_len(24)
                            .not_null()
                            .primary_key(),
                    )
                    .col(text(Projects::Title))
                    .col(text(Projects::Description))
                    .col(date(Projects::StartedAt))
                    .col(date(Projects::FinishedAt))
                    .col(string_len(Projects::ManagerId, 24))
                    .to_owned(),
            )
            .await?;

        // Backs `/projects/search?manager=`
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_manager_id")
                    .table(Projects::Table)
                    .col(Projects::ManagerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Title,
    Description,
    StartedAt,
    FinishedAt,
    ManagerId,
}
