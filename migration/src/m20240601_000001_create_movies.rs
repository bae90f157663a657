use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(string(Movies::Id).primary_key())
                    .col(big_integer_null(Movies::ShowId))
                    .col(string(Movies::Title))
                    .col(string_null(Movies::Type))
                    .col(text_null(Movies::Director))
                    .col(text_null(Movies::Cast))
                    .col(string_null(Movies::Country))
                    .col(string_null(Movies::DateAdded))
                    .col(integer_null(Movies::ReleaseYear))
                    .col(string_null(Movies::Rating))
                    .col(string_null(Movies::Duration))
                    .col(string_null(Movies::ListedIn))
                    .col(text_null(Movies::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_release_year")
                    .table(Movies::Table)
                    .col(Movies::ReleaseYear)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    ShowId,
    Title,
    Type,
    Director,
    Cast,
    Country,
    DateAdded,
    ReleaseYear,
    Rating,
    Duration,
    ListedIn,
    Description,
}
