use async_trait::async_trait;

use super::{AccountWithRoles, CreateAccountDto, DeliveryAccount, StoredFile};
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepositoryInterface: Send + Sync {
    /// Uniqueness pre-check. The unique constraint on the email column
    /// remains the final arbiter at insert time.
    async fn email_exists(&self, email: &str) -> DomainResult<bool>;

    async fn get_account_by_email(&self, email: &str) -> DomainResult<Option<AccountWithRoles>>;

    /// Insert account, role assignments and the optional delivery profile
    /// in a single transaction. A unique violation on email maps to
    /// `DomainError::DuplicateEmail`; an unseeded canonical role aborts
    /// the whole transaction with `DomainError::RoleConfig`.
    async fn create_account(&self, dto: CreateAccountDto) -> DomainResult<()>;

    async fn get_delivery_account(&self, account_id: &str)
        -> DomainResult<Option<DeliveryAccount>>;

    /// Replace the attached file of a delivery account. Full overwrite:
    /// no merge with the previous file, no versioning.
    async fn attach_file(&self, account_id: &str, file: StoredFile)
        -> DomainResult<DeliveryAccount>;

    /// Read back the stored file bytes with metadata, if any.
    async fn get_attached_file(&self, account_id: &str) -> DomainResult<Option<StoredFile>>;
}
