use chrono::{DateTime, Utc};

use crate::domain::role::RoleName;

/// Registered account (base identity fields, shared by both account kinds).
#[derive(Clone, Debug)]
pub struct Account {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub governorate: String,
    pub address: String,
    pub phone: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account together with its assigned roles.
#[derive(Clone, Debug)]
pub struct AccountWithRoles {
    pub account: Account,
    pub roles: Vec<RoleName>,
}

/// Banking/identity fields carried by a delivery account.
#[derive(Clone, Debug)]
pub struct DeliveryDetails {
    pub cin: String,
    pub account_holder: String,
    pub bank_name: String,
    pub agency_name: String,
    pub agency_city: String,
    pub rib: String,
}

/// Metadata of the file attached to a delivery account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachedFileMeta {
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

/// Delivery account projection returned by lookups and file attachment.
/// Exposes file metadata, never the raw bytes or the password hash.
#[derive(Clone, Debug)]
pub struct DeliveryAccount {
    pub account_id: String,
    pub email: String,
    pub details: DeliveryDetails,
    pub file: Option<AttachedFileMeta>,
}

/// A file received from the upload endpoint, stored as-is with metadata.
/// The three fields are set together or not at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Signup input shared by both account kinds. `password` is still the
/// plaintext here; it is hashed before anything is persisted.
#[derive(Clone, Debug)]
pub struct NewRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub governorate: String,
    pub address: String,
    pub phone: String,
    pub password: String,
    pub roles: Option<Vec<String>>,
}

/// Persistence-ready account row: password already hashed, role labels
/// already resolved to canonical names.
#[derive(Clone, Debug)]
pub struct CreateAccountDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub governorate: String,
    pub address: String,
    pub phone: String,
    pub password_hash: String,
    pub roles: Vec<RoleName>,
    pub delivery: Option<DeliveryDetails>,
}
