use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserDocuments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserDocuments::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(UserDocuments::Version)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserDocuments::Body).text().not_null())
                    .col(
                        ColumnDef::new(UserDocuments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserDocuments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserDocuments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserDocuments {
    Table,
    Id,
    UserId,
    Version,
    Body,
    CreatedAt,
    UpdatedAt,
}
