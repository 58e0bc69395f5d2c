//! Identity use-cases — registration, authentication, profile lookup

pub mod service;

pub use service::{AuthResult, IdentityService};
