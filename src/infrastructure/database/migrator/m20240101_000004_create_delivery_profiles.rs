//! Create delivery_profiles table migration

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeliveryProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeliveryProfiles::AccountId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DeliveryProfiles::Cin)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeliveryProfiles::AccountHolder)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeliveryProfiles::BankName)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeliveryProfiles::AgencyName)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeliveryProfiles::AgencyCity)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeliveryProfiles::Rib)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeliveryProfiles::FileName)
                            .string_len(30)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DeliveryProfiles::FileType)
                            .string_len(10)
                            .null(),
                    )
                    .col(ColumnDef::new(DeliveryProfiles::FileData).blob().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_delivery_profiles_account_id")
                            .from(DeliveryProfiles::Table, DeliveryProfiles::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeliveryProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DeliveryProfiles {
    Table,
    AccountId,
    Cin,
    AccountHolder,
    BankName,
    AgencyName,
    AgencyCity,
    Rib,
    FileName,
    FileType,
    FileData,
}
