//! Admin team service: granting, tuning, and revoking admin access.

use pairly_common::{AppError, AppResult, IdGenerator};
use pairly_db::{
    entities::account::{self, AccountStatus, AdminRole, AuthProvider, PermissionSet, Role},
    repositories::AccountRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::account::hash_password;
use crate::services::authorize::{Capability, authorize, default_permissions};

/// Admin team service.
#[derive(Clone)]
pub struct AdminTeamService {
    account_repo: AccountRepository,
    id_gen: IdGenerator,
}

/// Per-key overrides applied on top of a sub-role's default permission set.
/// Absent keys keep the default.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PermissionOverlay {
    pub manage_users: Option<bool>,
    pub manage_products: Option<bool>,
    pub manage_orders: Option<bool>,
    pub manage_events: Option<bool>,
    pub manage_couples: Option<bool>,
    pub manage_bookings: Option<bool>,
    pub view_reports: Option<bool>,
    pub manage_admin_team: Option<bool>,
}

impl PermissionOverlay {
    /// Apply the overrides to a base permission set.
    #[must_use]
    pub fn apply(self, base: PermissionSet) -> PermissionSet {
        PermissionSet {
            manage_users: self.manage_users.unwrap_or(base.manage_users),
            manage_products: self.manage_products.unwrap_or(base.manage_products),
            manage_orders: self.manage_orders.unwrap_or(base.manage_orders),
            manage_events: self.manage_events.unwrap_or(base.manage_events),
            manage_couples: self.manage_couples.unwrap_or(base.manage_couples),
            manage_bookings: self.manage_bookings.unwrap_or(base.manage_bookings),
            view_reports: self.view_reports.unwrap_or(base.view_reports),
            manage_admin_team: self.manage_admin_team.unwrap_or(base.manage_admin_team),
        }
    }
}

/// Input for creating a new admin account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GrantAdminRoleInput {
    #[validate(email)]
    pub email: String,

    pub password: String,

    pub admin_role: AdminRole,

    #[validate(length(max = 256))]
    pub name: Option<String>,

    /// Overrides on the sub-role's defaults.
    #[serde(default)]
    pub permissions: PermissionOverlay,
}

impl AdminTeamService {
    /// Create a new admin team service.
    #[must_use]
    pub fn new(account_repo: AccountRepository) -> Self {
        Self {
            account_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new admin account.
    ///
    /// The permission set is seeded from the sub-role defaults with the
    /// caller's overrides applied on top. Admin-team members bypass the
    /// pending workflow: the account is created approved and email-verified,
    /// with the granting actor recorded for audit.
    pub async fn grant_admin_role(
        &self,
        actor: &account::Model,
        input: GrantAdminRoleInput,
    ) -> AppResult<account::Model> {
        authorize(actor, Capability::ManageAdminTeam)?;
        input.validate()?;

        let email = input.email.trim().to_string();
        let email_lower = email.to_lowercase();

        if self.account_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let permissions = input.permissions.apply(default_permissions(input.admin_role));
        let password_hash = hash_password(&input.password)?;
        let now = chrono::Utc::now();

        let model = account::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(email),
            email_lower: Set(email_lower),
            password_hash: Set(Some(password_hash)),
            provider: Set(AuthProvider::Email),
            name: Set(input.name),
            role: Set(Role::Admin),
            admin_role: Set(Some(input.admin_role)),
            permissions: Set(permissions),
            status: Set(AccountStatus::Approved),
            email_verified: Set(true),
            approved_by: Set(Some(actor.id.clone())),
            approved_at: Set(Some(now.into())),
            added_by: Set(Some(actor.id.clone())),
            ..Default::default()
        };

        let granted = self.account_repo.create(model).await?;

        tracing::info!(
            account_id = %granted.id,
            actor_id = %actor.id,
            admin_role = ?input.admin_role,
            "Admin role granted"
        );

        Ok(granted)
    }

    /// List all admin accounts.
    pub async fn list_admins(&self, actor: &account::Model) -> AppResult<Vec<account::Model>> {
        authorize(actor, Capability::ManageAdminTeam)?;
        self.account_repo.list_admins().await
    }

    /// Apply permission overrides on top of an admin's current set. Stored
    /// values are authoritative; the sub-role matrix only seeds creation.
    pub async fn update_permissions(
        &self,
        actor: &account::Model,
        account_id: &str,
        overlay: PermissionOverlay,
    ) -> AppResult<account::Model> {
        authorize(actor, Capability::ManageAdminTeam)?;

        let target = self.account_repo.get_by_id(account_id).await?;

        if target.role != Role::Admin {
            return Err(AppError::BadRequest(
                "Account is not an admin".to_string(),
            ));
        }

        let permissions = overlay.apply(target.permissions);

        let mut active: account::ActiveModel = target.into();
        active.permissions = Set(permissions);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.account_repo.update(active).await?;

        tracing::info!(
            account_id,
            actor_id = %actor.id,
            "Admin permissions updated"
        );

        Ok(updated)
    }

    /// Revoke admin access, returning the account to a regular member.
    pub async fn revoke_admin(
        &self,
        actor: &account::Model,
        account_id: &str,
    ) -> AppResult<account::Model> {
        authorize(actor, Capability::ManageAdminTeam)?;

        if actor.id == account_id {
            return Err(AppError::BadRequest(
                "Cannot revoke your own admin role".to_string(),
            ));
        }

        let target = self.account_repo.get_by_id(account_id).await?;

        if target.role != Role::Admin {
            return Err(AppError::BadRequest(
                "Account is not an admin".to_string(),
            ));
        }

        let mut active: account::ActiveModel = target.into();
        active.role = Set(Role::User);
        active.admin_role = Set(None);
        active.permissions = Set(PermissionSet::default());
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let revoked = self.account_repo.update(active).await?;

        tracing::info!(account_id, actor_id = %actor.id, "Admin role revoked");

        Ok(revoked)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pairly_db::entities::account::AuthProvider;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_admin(id: &str, permissions: PermissionSet) -> account::Model {
        account::Model {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            email_lower: format!("{id}@example.com"),
            password_hash: None,
            provider: AuthProvider::Email,
            email_verified: true,
            status: AccountStatus::Approved,
            role: Role::Admin,
            admin_role: Some(AdminRole::Manager),
            permissions,
            name: None,
            token: None,
            approved_by: None,
            approved_at: None,
            review_note: None,
            added_by: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_service(db: Arc<sea_orm::DatabaseConnection>) -> AdminTeamService {
        AdminTeamService::new(AccountRepository::new(db))
    }

    #[tokio::test]
    async fn test_grant_requires_manage_admin_team() {
        // A manager with default permissions lacks manageAdminTeam.
        let actor = test_admin("mgr1", default_permissions(AdminRole::Manager));
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let result = service
            .grant_admin_role(
                &actor,
                GrantAdminRoleInput {
                    email: "new-admin@example.com".to_string(),
                    password: "secret123".to_string(),
                    admin_role: AdminRole::Supervisor,
                    name: None,
                    permissions: PermissionOverlay::default(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_grant_rejects_duplicate_email() {
        let actor = test_admin("root1", default_permissions(AdminRole::SuperAdmin));
        let existing = test_admin("acct2", PermissionSet::default());
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .grant_admin_role(
                &actor,
                GrantAdminRoleInput {
                    email: "acct2@example.com".to_string(),
                    password: "secret123".to_string(),
                    admin_role: AdminRole::Manager,
                    name: None,
                    permissions: PermissionOverlay::default(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[test]
    fn test_overlay_grants_manager_admin_team_access() {
        let overlay = PermissionOverlay {
            manage_admin_team: Some(true),
            ..PermissionOverlay::default()
        };
        let perms = overlay.apply(default_permissions(AdminRole::Manager));

        assert!(perms.manage_admin_team);
        assert!(perms.manage_users);
    }

    #[test]
    fn test_overlay_can_narrow_defaults() {
        let overlay = PermissionOverlay {
            manage_users: Some(false),
            manage_couples: Some(false),
            ..PermissionOverlay::default()
        };
        let perms = overlay.apply(default_permissions(AdminRole::SuperAdmin));

        assert!(!perms.manage_users);
        assert!(!perms.manage_couples);
        assert!(perms.manage_admin_team);
    }

    #[tokio::test]
    async fn test_revoke_own_role_rejected() {
        let actor = test_admin("root1", default_permissions(AdminRole::SuperAdmin));
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let result = service.revoke_admin(&actor, "root1").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_permissions_rejects_regular_user() {
        let actor = test_admin("root1", default_permissions(AdminRole::SuperAdmin));
        let mut target = test_admin("acct2", PermissionSet::default());
        target.role = Role::User;
        target.admin_role = None;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[target]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .update_permissions(&actor, "acct2", PermissionOverlay::default())
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
