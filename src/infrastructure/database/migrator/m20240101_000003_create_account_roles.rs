//! Create account_roles join table migration

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts::Accounts;
use super::m20240101_000002_create_roles::Roles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AccountRoles::AccountId).string().not_null())
                    .col(ColumnDef::new(AccountRoles::RoleId).string().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_account_roles")
                            .col(AccountRoles::AccountId)
                            .col(AccountRoles::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_roles_account_id")
                            .from(AccountRoles::Table, AccountRoles::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_roles_role_id")
                            .from(AccountRoles::Table, AccountRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on account_id for role gathering at signin
        manager
            .create_index(
                Index::create()
                    .name("idx_account_roles_account_id")
                    .table(AccountRoles::Table)
                    .col(AccountRoles::AccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccountRoles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AccountRoles {
    Table,
    AccountId,
    RoleId,
}
