//! Authentication module — sign-in, registration, profile lookup, file upload

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
