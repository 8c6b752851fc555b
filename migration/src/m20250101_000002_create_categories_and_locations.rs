use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Categories
        manager.create_table(
            Table::create()
                .table(Categories::Table)
                .if_not_exists()
                .col(ColumnDef::new(Categories::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Categories::Title).string_len(256).not_null().unique_key())
                .col(ColumnDef::new(Categories::Description).text().not_null().default(""))
                .col(ColumnDef::new(Categories::Slug).string_len(64).not_null().unique_key())
                .col(ColumnDef::new(Categories::IsPublished).boolean().not_null().default(true))
                .col(ColumnDef::new(Categories::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Categories::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned(),
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_categories_slug_published")
                .table(Categories::Table)
                .col(Categories::Slug)
                .col(Categories::IsPublished)
                .to_owned(),
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_categories_created_at")
                .table(Categories::Table)
                .col(Categories::CreatedAt)
                .to_owned(),
        ).await?;

        // 2. Locations
        manager.create_table(
            Table::create()
                .table(Locations::Table)
                .if_not_exists()
                .col(ColumnDef::new(Locations::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Locations::Name).string_len(256).not_null().unique_key())
                .col(ColumnDef::new(Locations::IsPublished).boolean().not_null().default(true))
                .col(ColumnDef::new(Locations::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Locations::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned(),
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_locations_name_published")
                .table(Locations::Table)
                .col(Locations::Name)
                .col(Locations::IsPublished)
                .to_owned(),
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_locations_created_at")
                .table(Locations::Table)
                .col(Locations::CreatedAt)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Locations::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Categories::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
pub enum Categories {
    Table,
    Id,
    Title,
    Description,
    Slug,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum Locations {
    Table,
    Id,
    Name,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}
