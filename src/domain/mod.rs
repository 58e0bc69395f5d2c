//! Domain layer - core entities, role resolution and repository contracts

pub mod account;
pub mod error;
pub mod role;

pub use account::{
    Account, AccountRepositoryInterface, AccountWithRoles, AttachedFileMeta, CreateAccountDto,
    DeliveryAccount, DeliveryDetails, NewRegistration, StoredFile,
};
pub use error::{DomainError, DomainResult};
pub use role::{resolve_role_labels, RoleName};
