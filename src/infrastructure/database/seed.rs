//! Reference-data seeding
//!
//! The role table holds exactly three canonical rows. Request flow only
//! reads them; a missing row at resolution time is a deployment defect.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

use super::entities::role;
use crate::domain::RoleName;

/// Insert the canonical role rows that are not present yet. Idempotent.
pub async fn seed_roles(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    for name in RoleName::ALL {
        let existing = role::Entity::find()
            .filter(role::Column::Name.eq(name.as_str()))
            .one(db)
            .await?;

        if existing.is_none() {
            role::ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                name: Set(name.as_str().to_string()),
            }
            .insert(db)
            .await?;
            info!("Seeded role {}", name.as_str());
        }
    }

    Ok(())
}
