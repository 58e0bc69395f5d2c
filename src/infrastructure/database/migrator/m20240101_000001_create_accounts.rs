//! Create accounts table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::FirstName)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::LastName)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Email)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Governorate)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Address)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::Phone).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Accounts::PasswordHash)
                            .string_len(120)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on email for the signin/uniqueness lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_accounts_email")
                    .table(Accounts::Table)
                    .col(Accounts::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Accounts {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Governorate,
    Address,
    Phone,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}
