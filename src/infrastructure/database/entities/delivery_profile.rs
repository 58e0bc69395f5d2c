//! Delivery profile entity
//!
//! 1:1 extension of an account, keyed by the account id. Carries the
//! banking/identity fields plus the optionally attached file. The three
//! file columns are written together or not at all.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Delivery profile model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "delivery_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: String,
    pub cin: String,
    pub account_holder: String,
    pub bank_name: String,
    pub agency_name: String,
    pub agency_city: String,
    pub rib: String,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    #[sea_orm(column_type = "Blob", nullable)]
    pub file_data: Option<Vec<u8>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
