use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_users_table::Users;
use crate::m20250101_000002_create_categories_and_locations::{Categories, Locations};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Posts::Table)
                .if_not_exists()
                .col(ColumnDef::new(Posts::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Posts::Title).string_len(256).not_null())
                .col(ColumnDef::new(Posts::Text).text().not_null())
                .col(ColumnDef::new(Posts::Slug).string_len(256).not_null().unique_key())
                .col(ColumnDef::new(Posts::PubDate).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Posts::AuthorId).big_integer().not_null())
                .col(ColumnDef::new(Posts::LocationId).big_integer().null())
                .col(ColumnDef::new(Posts::CategoryId).big_integer().null())
                .col(ColumnDef::new(Posts::IsPublished).boolean().not_null().default(true))
                .col(ColumnDef::new(Posts::Image).string().null())
                .col(ColumnDef::new(Posts::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Posts::UpdatedAt).timestamp_with_time_zone().not_null())
                // Author owns the post
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_posts_author_id")
                        .from(Posts::Table, Posts::AuthorId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_posts_location_id")
                        .from(Posts::Table, Posts::LocationId)
                        .to(Locations::Table, Locations::Id)
                        .on_delete(ForeignKeyAction::SetNull),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_posts_category_id")
                        .from(Posts::Table, Posts::CategoryId)
                        .to(Categories::Table, Categories::Id)
                        .on_delete(ForeignKeyAction::SetNull),
                )
                .to_owned(),
        ).await?;

        // Feed ordering and category feeds
        manager.create_index(
            Index::create()
                .name("idx_posts_pub_date_published")
                .table(Posts::Table)
                .col(Posts::PubDate)
                .col(Posts::IsPublished)
                .to_owned(),
        ).await?;
        manager.create_index(
            Index::create()
                .name("idx_posts_category_pub_date")
                .table(Posts::Table)
                .col(Posts::CategoryId)
                .col(Posts::PubDate)
                .to_owned(),
        ).await?;
        manager.create_index(
            Index::create()
                .name("idx_posts_created_at")
                .table(Posts::Table)
                .col(Posts::CreatedAt)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Posts::Table).to_owned()).await
    }
}

#[derive(Iden)]
enum Posts {
    Table,
    Id,
    Title,
    Text,
    Slug,
    PubDate,
    AuthorId,
    LocationId,
    CategoryId,
    IsPublished,
    Image,
    CreatedAt,
    UpdatedAt,
}
