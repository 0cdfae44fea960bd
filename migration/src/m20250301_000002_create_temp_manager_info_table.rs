use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TempManagerInfo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TempManagerInfo::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TempManagerInfo::SaveId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TempManagerInfo::FirstName).string().not_null())
                    .col(ColumnDef::new(TempManagerInfo::LastName).string().not_null())
                    .col(
                        ColumnDef::new(TempManagerInfo::Nationality)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(TempManagerInfo::BirthPlace)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(TempManagerInfo::DateOfBirth).string())
                    .col(
                        ColumnDef::new(TempManagerInfo::FavoriteTeam)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(TempManagerInfo::SelectedClub).string())
                    .col(
                        ColumnDef::new(TempManagerInfo::CoachingLicense)
                            .string()
                            .not_null()
                            .default("None"),
                    )
                    .col(
                        ColumnDef::new(TempManagerInfo::PlayingExperience)
                            .string()
                            .not_null()
                            .default("Amateur"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_temp_manager_info_save_id")
                            .from(TempManagerInfo::Table, TempManagerInfo::SaveId)
                            .to(SaveMetadata::Table, SaveMetadata::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TempManagerInfo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TempManagerInfo {
    Table,
    Id,
    SaveId,
    FirstName,
    LastName,
    Nationality,
    BirthPlace,
    DateOfBirth,
    FavoriteTeam,
    SelectedClub,
    CoachingLicense,
    PlayingExperience,
}

#[derive(DeriveIden)]
enum SaveMetadata {
    Table,
    Id,
}
