//! Couple entity: the pairing of two accounts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a couple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum CoupleStatus {
    #[sea_orm(string_value = "active")]
    #[default]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "pending")]
    Pending,
}

/// Couple record.
///
/// A newly approved account gets a placeholder couple paired with itself;
/// linking a partner later replaces the second slot.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "couple")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub partner_one_id: String,

    /// Equal to `partner_one_id` while the couple is a self-paired placeholder.
    pub partner_two_id: String,

    pub status: CoupleStatus,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// Whether this couple is still the self-paired placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.partner_one_id == self.partner_two_id
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::PartnerOneId",
        to = "super::account::Column::Id"
    )]
    PartnerOne,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::PartnerTwoId",
        to = "super::account::Column::Id"
    )]
    PartnerTwo,
}

impl ActiveModelBehavior for ActiveModel {}
