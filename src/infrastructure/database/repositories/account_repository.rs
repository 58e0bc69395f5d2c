use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::domain::{
    Account, AccountRepositoryInterface, AccountWithRoles, AttachedFileMeta, CreateAccountDto,
    DeliveryAccount, DeliveryDetails, DomainError, DomainResult, RoleName, StoredFile,
};
use crate::infrastructure::database::entities::{account, account_role, delivery_profile, role};

pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn account_model_to_domain(model: account::Model) -> Account {
    Account {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        governorate: model.governorate,
        address: model.address,
        phone: model.phone,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn role_name_from_str(name: &str) -> Option<RoleName> {
    RoleName::ALL.iter().copied().find(|r| r.as_str() == name)
}

fn profile_to_delivery_account(email: String, model: delivery_profile::Model) -> DeliveryAccount {
    let file = match (&model.file_name, &model.file_type, &model.file_data) {
        (Some(name), Some(content_type), Some(data)) => Some(AttachedFileMeta {
            name: name.clone(),
            content_type: content_type.clone(),
            size: data.len() as u64,
        }),
        _ => None,
    };

    DeliveryAccount {
        account_id: model.account_id,
        email,
        details: DeliveryDetails {
            cin: model.cin,
            account_holder: model.account_holder,
            bank_name: model.bank_name,
            agency_name: model.agency_name,
            agency_city: model.agency_city,
            rib: model.rib,
        },
        file,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AccountRepositoryInterface for AccountRepository {
    async fn email_exists(&self, email: &str) -> DomainResult<bool> {
        let found = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(found.is_some())
    }

    async fn get_account_by_email(&self, email: &str) -> DomainResult<Option<AccountWithRoles>> {
        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(model) = model else {
            return Ok(None);
        };

        let roles = model
            .find_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .iter()
            .filter_map(|r| role_name_from_str(&r.name))
            .collect();

        Ok(Some(AccountWithRoles {
            account: account_model_to_domain(model),
            roles,
        }))
    }

    async fn create_account(&self, dto: CreateAccountDto) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // Canonical role lookup first: a missing seed row aborts the whole
        // operation before any write happens.
        let mut role_ids = Vec::with_capacity(dto.roles.len());
        for name in &dto.roles {
            let row = role::Entity::find()
                .filter(role::Column::Name.eq(name.as_str()))
                .one(&txn)
                .await
                .map_err(db_err)?;

            match row {
                Some(r) => role_ids.push(r.id),
                None => return Err(DomainError::RoleConfig(name.as_str().to_string())),
            }
        }

        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();
        let email = dto.email.clone();

        let new_account = account::ActiveModel {
            id: Set(id.clone()),
            first_name: Set(dto.first_name),
            last_name: Set(dto.last_name),
            email: Set(dto.email),
            governorate: Set(dto.governorate),
            address: Set(dto.address),
            phone: Set(dto.phone),
            password_hash: Set(dto.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The unique constraint on email is the final arbiter under
        // concurrent registration; report a violation exactly like the
        // pre-check does.
        new_account.insert(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::DuplicateEmail(email)
            } else {
                db_err(e)
            }
        })?;

        for role_id in role_ids {
            account_role::ActiveModel {
                account_id: Set(id.clone()),
                role_id: Set(role_id),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        if let Some(details) = dto.delivery {
            delivery_profile::ActiveModel {
                account_id: Set(id.clone()),
                cin: Set(details.cin),
                account_holder: Set(details.account_holder),
                bank_name: Set(details.bank_name),
                agency_name: Set(details.agency_name),
                agency_city: Set(details.agency_city),
                rib: Set(details.rib),
                file_name: Set(None),
                file_type: Set(None),
                file_data: Set(None),
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn get_delivery_account(
        &self,
        account_id: &str,
    ) -> DomainResult<Option<DeliveryAccount>> {
        let profile = delivery_profile::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(profile) = profile else {
            return Ok(None);
        };

        let email = account::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(|a| a.email)
            .unwrap_or_default();

        Ok(Some(profile_to_delivery_account(email, profile)))
    }

    async fn attach_file(
        &self,
        account_id: &str,
        file: StoredFile,
    ) -> DomainResult<DeliveryAccount> {
        let profile = delivery_profile::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(profile) = profile else {
            return Err(DomainError::NotFound {
                entity: "DeliveryAccount",
                field: "id",
                value: account_id.to_string(),
            });
        };

        // Full overwrite: the previous file (if any) is gone entirely.
        let mut active: delivery_profile::ActiveModel = profile.into();
        active.file_name = Set(Some(file.name));
        active.file_type = Set(Some(file.content_type));
        active.file_data = Set(Some(file.data));

        let updated = active.update(&self.db).await.map_err(db_err)?;

        let email = account::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(|a| a.email)
            .unwrap_or_default();

        Ok(profile_to_delivery_account(email, updated))
    }

    async fn get_attached_file(&self, account_id: &str) -> DomainResult<Option<StoredFile>> {
        let profile = delivery_profile::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(profile) = profile else {
            return Ok(None);
        };

        Ok(
            match (profile.file_name, profile.file_type, profile.file_data) {
                (Some(name), Some(content_type), Some(data)) => Some(StoredFile {
                    name,
                    content_type,
                    data,
                }),
                _ => None,
            },
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::seed::seed_roles;

    async fn test_repo() -> AccountRepository {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        seed_roles(&db).await.unwrap();
        AccountRepository::new(db)
    }

    fn create_dto(email: &str, roles: Vec<RoleName>) -> CreateAccountDto {
        CreateAccountDto {
            first_name: "Sami".to_string(),
            last_name: "Trabelsi".to_string(),
            email: email.to_string(),
            governorate: "Sfax".to_string(),
            address: "5 Avenue Habib Bourguiba".to_string(),
            phone: "21698765".to_string(),
            password_hash: "$2b$12$not-a-real-hash".to_string(),
            roles,
            delivery: None,
        }
    }

    #[tokio::test]
    async fn insert_without_precheck_maps_unique_violation() {
        let repo = test_repo().await;

        repo.create_account(create_dto("sami@example.com", vec![RoleName::User]))
            .await
            .unwrap();

        // Bypass any uniqueness pre-check and go straight to the store:
        // the constraint itself must report the duplicate.
        let err = repo
            .create_account(create_dto("sami@example.com", vec![RoleName::User]))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::DuplicateEmail("sami@example.com".into()));
    }

    #[tokio::test]
    async fn missing_role_seed_aborts_without_partial_writes() {
        let repo = test_repo().await;

        role::Entity::delete_many()
            .filter(role::Column::Name.eq(RoleName::Delivery.as_str()))
            .exec(&repo.db)
            .await
            .unwrap();

        let err = repo
            .create_account(create_dto(
                "leila@example.com",
                vec![RoleName::User, RoleName::Delivery],
            ))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::RoleConfig("ROLE_DELIVERY".into()));
        assert!(!repo.email_exists("leila@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn roles_survive_the_round_trip() {
        let repo = test_repo().await;

        repo.create_account(create_dto(
            "rym@example.com",
            vec![RoleName::Admin, RoleName::User],
        ))
        .await
        .unwrap();

        let found = repo
            .get_account_by_email("rym@example.com")
            .await
            .unwrap()
            .unwrap();

        let mut roles = found.roles.clone();
        roles.sort();
        assert_eq!(roles, vec![RoleName::User, RoleName::Admin]);
    }
}
