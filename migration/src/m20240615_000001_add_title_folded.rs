use sea_orm_migration::{prelude::*, schema::*, sea_orm::ConnectionTrait};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Movies::Table)
                    .add_column(string(Movies::TitleFolded).default(""))
                    .to_owned(),
            )
            .await?;

        // lower() only folds ASCII; reseed to fold non-ASCII titles of existing rows.
        manager
            .get_connection()
            .execute_unprepared("UPDATE movies SET title_folded = lower(title)")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(Table::alter().table(Movies::Table).drop_column(Movies::TitleFolded).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    TitleFolded,
}
