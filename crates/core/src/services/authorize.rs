//! Permission checks for admin capabilities.

use pairly_common::{AppError, AppResult};
use pairly_db::entities::account::{self, AdminRole, PermissionSet, Role};

/// A single admin capability, matching one key of the permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageUsers,
    ManageProducts,
    ManageOrders,
    ManageEvents,
    ManageCouples,
    ManageBookings,
    ViewReports,
    ManageAdminTeam,
}

impl Capability {
    /// Stable name used in audit logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManageUsers => "manageUsers",
            Self::ManageProducts => "manageProducts",
            Self::ManageOrders => "manageOrders",
            Self::ManageEvents => "manageEvents",
            Self::ManageCouples => "manageCouples",
            Self::ManageBookings => "manageBookings",
            Self::ViewReports => "viewReports",
            Self::ManageAdminTeam => "manageAdminTeam",
        }
    }
}

/// Whether a permission set grants a capability. Absent keys deny.
#[must_use]
pub const fn allows(permissions: &PermissionSet, capability: Capability) -> bool {
    match capability {
        Capability::ManageUsers => permissions.manage_users,
        Capability::ManageProducts => permissions.manage_products,
        Capability::ManageOrders => permissions.manage_orders,
        Capability::ManageEvents => permissions.manage_events,
        Capability::ManageCouples => permissions.manage_couples,
        Capability::ManageBookings => permissions.manage_bookings,
        Capability::ViewReports => permissions.view_reports,
        Capability::ManageAdminTeam => permissions.manage_admin_team,
    }
}

/// Default permission set for an admin tier.
#[must_use]
pub const fn default_permissions(admin_role: AdminRole) -> PermissionSet {
    match admin_role {
        AdminRole::SuperAdmin => PermissionSet {
            manage_users: true,
            manage_products: true,
            manage_orders: true,
            manage_events: true,
            manage_couples: true,
            manage_bookings: true,
            view_reports: true,
            manage_admin_team: true,
        },
        AdminRole::Manager => PermissionSet {
            manage_users: true,
            manage_products: true,
            manage_orders: true,
            manage_events: true,
            manage_couples: true,
            manage_bookings: true,
            view_reports: true,
            manage_admin_team: false,
        },
        AdminRole::Supervisor => PermissionSet {
            manage_users: false,
            manage_products: true,
            manage_orders: true,
            manage_events: true,
            manage_couples: false,
            manage_bookings: true,
            view_reports: true,
            manage_admin_team: false,
        },
    }
}

/// Require that the account holds the admin role.
pub fn require_admin(account: &account::Model) -> AppResult<()> {
    if account.role == Role::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".to_string()))
    }
}

/// Require that the account is an admin holding the given capability.
///
/// Super admins pass every check regardless of their stored flags; everyone
/// else is checked against the per-account permission set.
pub fn authorize(account: &account::Model, capability: Capability) -> AppResult<()> {
    require_admin(account)?;

    if account.admin_role == Some(AdminRole::SuperAdmin)
        || allows(&account.permissions, capability)
    {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Missing permission: {}",
            capability.as_str()
        )))
    }
}
