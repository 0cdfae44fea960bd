use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SaveMetadata::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SaveMetadata::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SaveMetadata::UserId).uuid().not_null())
                    .col(ColumnDef::new(SaveMetadata::Name).string().not_null())
                    .col(ColumnDef::new(SaveMetadata::ManagerName).string().not_null())
                    .col(
                        ColumnDef::new(SaveMetadata::DateCreated)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SaveMetadata::DateLastOpened)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(SaveMetadata::MostRecentTeam).string())
                    .col(ColumnDef::new(SaveMetadata::MostRecentPlace).string())
                    .col(ColumnDef::new(SaveMetadata::MostRecentSeason).string())
                    .to_owned(),
            )
            .await?;

        // Saves are listed per user ordered by recency
        manager
            .create_index(
                Index::create()
                    .name("idx_save_metadata_user_id_date_last_opened")
                    .table(SaveMetadata::Table)
                    .col(SaveMetadata::UserId)
                    .col(SaveMetadata::DateLastOpened)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SaveMetadata::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SaveMetadata {
    Table,
    Id,
    UserId,
    Name,
    ManagerName,
    DateCreated,
    DateLastOpened,
    MostRecentTeam,
    MostRecentPlace,
    MostRecentSeason,
}
