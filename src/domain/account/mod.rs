//! Account aggregate
//!
//! Contains the account models, creation DTOs, and repository interface.

pub mod model;
pub mod repository;

pub use model::{
    Account, AccountWithRoles, AttachedFileMeta, CreateAccountDto, DeliveryAccount,
    DeliveryDetails, NewRegistration, StoredFile,
};
pub use repository::AccountRepositoryInterface;
