//! # Wings User Service
//!
//! User/authentication microservice for the Wings delivery platform:
//! email+password sign-in issuing a JWT, registration of standard and
//! delivery accounts, role assignment, and delivery document upload.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core entities, role resolution and repository contracts
//! - **application**: Business logic and use cases (identity service)
//! - **infrastructure**: External concerns (crypto primitives, database)
//! - **interfaces**: HTTP REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
