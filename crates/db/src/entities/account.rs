//! Account entity: user and admin identities with lifecycle status.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an account.
///
/// New signups start at `Pending`; only explicit administrator actions move
/// an account between states. Stored as plain strings so the records stay
/// human-auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum AccountStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

/// Top-level role of an account. Independent of lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Role {
    #[sea_orm(string_value = "user")]
    #[default]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Admin sub-role. Only meaningful when `role = Admin`; determines the
/// default permission set at admin-creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "supervisor")]
    Supervisor,
}

/// Authentication provider for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum AuthProvider {
    #[sea_orm(string_value = "email")]
    #[default]
    Email,
    #[sea_orm(string_value = "google")]
    Google,
    #[sea_orm(string_value = "facebook")]
    Facebook,
}

/// The fixed eight-key capability map held by admin accounts.
///
/// Stored as a JSON object with camelCase keys. A key absent from the stored
/// JSON deserializes to `false`; unknown keys are ignored rather than merged.
/// For non-admin accounts all flags are false.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult,
)]
#[serde(default, rename_all = "camelCase")]
pub struct PermissionSet {
    pub manage_users: bool,
    pub manage_products: bool,
    pub manage_orders: bool,
    pub manage_events: bool,
    pub manage_couples: bool,
    pub manage_bookings: bool,
    pub view_reports: bool,
    pub manage_admin_team: bool,
}

/// Account record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Email address as entered at signup.
    #[sea_orm(unique)]
    pub email: String,

    /// Lowercased email; the case-insensitive identity.
    #[sea_orm(unique)]
    pub email_lower: String,

    /// Argon2 PHC-format hash. Only set for the `email` provider.
    #[sea_orm(nullable)]
    pub password_hash: Option<String>,

    pub provider: AuthProvider,

    /// Whether the email address has been verified.
    #[sea_orm(default_value = false)]
    pub email_verified: bool,

    pub status: AccountStatus,

    pub role: Role,

    /// Admin sub-role; NULL for regular users.
    #[sea_orm(nullable)]
    pub admin_role: Option<AdminRole>,

    /// Capability flags. Authoritative after creation; defaults from the
    /// admin sub-role apply only at admin-creation time.
    #[sea_orm(column_type = "JsonBinary")]
    pub permissions: PermissionSet,

    /// Display name.
    #[sea_orm(nullable)]
    pub name: Option<String>,

    /// Bearer token for API access.
    #[sea_orm(unique, nullable)]
    pub token: Option<String>,

    /// Admin who approved this account.
    #[sea_orm(nullable)]
    pub approved_by: Option<String>,

    /// When the account was approved. Set together with `approved_by`.
    #[sea_orm(nullable)]
    pub approved_at: Option<DateTimeWithTimeZone>,

    /// Note recorded with the most recent lifecycle decision.
    #[sea_orm(column_type = "Text", nullable)]
    pub review_note: Option<String>,

    /// Admin who created this account (admin-team members only).
    #[sea_orm(nullable)]
    pub added_by: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,

    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,

    #[sea_orm(has_many = "super::wishlist_item::Entity")]
    WishlistItems,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::wishlist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
