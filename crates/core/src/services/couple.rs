//! Couple service: linking two member accounts.

use pairly_common::{AppError, AppResult, IdGenerator};
use pairly_db::{
    entities::{
        account::{self, AccountStatus},
        couple::{self, CoupleStatus},
    },
    repositories::{AccountRepository, CoupleRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::authorize::{Capability, authorize};

/// Couple service.
#[derive(Clone)]
pub struct CoupleService {
    couple_repo: CoupleRepository,
    account_repo: AccountRepository,
    id_gen: IdGenerator,
}

/// Input for linking two accounts as a couple.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkCoupleInput {
    pub partner_one_id: String,
    pub partner_two_id: String,
}

impl CoupleService {
    /// Create a new couple service.
    #[must_use]
    pub fn new(couple_repo: CoupleRepository, account_repo: AccountRepository) -> Self {
        Self {
            couple_repo,
            account_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Link two approved accounts as a couple.
    ///
    /// A member may link themselves to a partner; linking two other accounts
    /// requires the couples capability. A placeholder couple left over from
    /// approval is upgraded in place rather than duplicated.
    pub async fn link(
        &self,
        actor: &account::Model,
        input: LinkCoupleInput,
    ) -> AppResult<couple::Model> {
        input.validate()?;

        if input.partner_one_id == input.partner_two_id {
            return Err(AppError::Validation(
                "A couple needs two distinct accounts".to_string(),
            ));
        }

        if actor.id != input.partner_one_id && actor.id != input.partner_two_id {
            authorize(actor, Capability::ManageCouples)?;
        }

        let partner_one = self.account_repo.get_by_id(&input.partner_one_id).await?;
        let partner_two = self.account_repo.get_by_id(&input.partner_two_id).await?;

        for partner in [&partner_one, &partner_two] {
            if partner.status != AccountStatus::Approved {
                return Err(AppError::Conflict(format!(
                    "Account {} is not approved",
                    partner.id
                )));
            }
        }

        let existing_one = self.couple_repo.find_by_partner(&partner_one.id).await?;
        let existing_two = self.couple_repo.find_by_partner(&partner_two.id).await?;

        if let Some(ref c) = existing_one
            && !c.is_placeholder()
        {
            return Err(AppError::Conflict(format!(
                "Account {} is already in a couple",
                partner_one.id
            )));
        }
        if let Some(ref c) = existing_two
            && !c.is_placeholder()
        {
            return Err(AppError::Conflict(format!(
                "Account {} is already in a couple",
                partner_two.id
            )));
        }

        // The second partner's placeholder is retired once linked.
        if let Some(placeholder) = existing_two {
            let mut active: couple::ActiveModel = placeholder.into();
            active.status = Set(CoupleStatus::Inactive);
            active.updated_at = Set(Some(chrono::Utc::now().into()));
            self.couple_repo.update(active).await?;
        }

        let linked = if let Some(placeholder) = existing_one {
            let mut active: couple::ActiveModel = placeholder.into();
            active.partner_two_id = Set(partner_two.id.clone());
            active.status = Set(CoupleStatus::Active);
            active.updated_at = Set(Some(chrono::Utc::now().into()));
            self.couple_repo.update(active).await?
        } else {
            let model = couple::ActiveModel {
                id: Set(self.id_gen.generate()),
                partner_one_id: Set(partner_one.id.clone()),
                partner_two_id: Set(partner_two.id.clone()),
                status: Set(CoupleStatus::Active),
                ..Default::default()
            };
            self.couple_repo.create(model).await?
        };

        tracing::info!(
            couple_id = %linked.id,
            partner_one = %partner_one.id,
            partner_two = %partner_two.id,
            "Couple linked"
        );

        Ok(linked)
    }

    /// Set a couple's status.
    pub async fn set_status(
        &self,
        actor: &account::Model,
        couple_id: &str,
        status: CoupleStatus,
    ) -> AppResult<couple::Model> {
        authorize(actor, Capability::ManageCouples)?;

        let existing = self.couple_repo.get_by_id(couple_id).await?;

        let mut active: couple::ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.couple_repo.update(active).await?;

        tracing::info!(couple_id, actor_id = %actor.id, status = ?status, "Couple status set");

        Ok(updated)
    }

    /// Get the couple the calling account belongs to.
    pub async fn get_own(&self, account: &account::Model) -> AppResult<couple::Model> {
        self.couple_repo
            .find_by_partner(&account.id)
            .await?
            .ok_or_else(|| AppError::NotFound("No couple for this account".to_string()))
    }

    /// List couples (admin view).
    pub async fn list(
        &self,
        actor: &account::Model,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<couple::Model>> {
        authorize(actor, Capability::ManageCouples)?;
        self.couple_repo.list(limit, offset).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pairly_db::entities::account::{AuthProvider, PermissionSet, Role};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_member(id: &str) -> account::Model {
        account::Model {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            email_lower: format!("{id}@example.com"),
            password_hash: None,
            provider: AuthProvider::Email,
            email_verified: true,
            status: AccountStatus::Approved,
            role: Role::User,
            admin_role: None,
            permissions: PermissionSet::default(),
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

    #[tokio::test]
    async fn test_link_rejects_same_account_twice() {
        let couple_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let account_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = CoupleService::new(
            CoupleRepository::new(couple_db),
            AccountRepository::new(account_db),
        );

        let actor = test_member("acct1");
        let result = service
            .link(
                &actor,
                LinkCoupleInput {
                    partner_one_id: "acct1".to_string(),
                    partner_two_id: "acct1".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_link_third_party_requires_manage_couples() {
        let couple_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let account_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = CoupleService::new(
            CoupleRepository::new(couple_db),
            AccountRepository::new(account_db),
        );

        let actor = test_member("bystander");
        let result = service
            .link(
                &actor,
                LinkCoupleInput {
                    partner_one_id: "acct1".to_string(),
                    partner_two_id: "acct2".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
