//! Account service: registration, sign-in, and the approval lifecycle.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use pairly_common::{AppError, AppResult, Config, IdGenerator};
use pairly_db::{
    entities::{
        account::{self, AccountStatus, AuthProvider, Role},
        couple::{self, CoupleStatus},
    },
    repositories::{AccountRepository, CoupleRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Account service for registration, authentication, and moderation.
#[derive(Clone)]
pub struct AccountService {
    account_repo: AccountRepository,
    couple_repo: CoupleRepository,
    id_gen: IdGenerator,
    min_password_length: usize,
}

/// Input for registering a new account.
///
/// A password is required for the email provider only; social-provider
/// signups carry no local credential.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,

    pub password: Option<String>,

    #[serde(default)]
    pub provider: AuthProvider,

    #[validate(length(max = 256))]
    pub name: Option<String>,
}

/// Input for signing in.
#[derive(Debug, Deserialize, Validate)]
pub struct AuthenticateInput {
    #[validate(email)]
    pub email: String,

    pub password: String,
}

/// Input for an approval or rejection decision.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReviewInput {
    #[validate(length(max = 2048))]
    pub note: Option<String>,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(
        account_repo: AccountRepository,
        couple_repo: CoupleRepository,
        config: &Config,
    ) -> Self {
        Self {
            account_repo,
            couple_repo,
            id_gen: IdGenerator::new(),
            min_password_length: config.accounts.min_password_length,
        }
    }

    /// Register a new account. It starts pending and cannot sign in until
    /// an admin approves it.
    pub async fn register(&self, input: RegisterInput) -> AppResult<account::Model> {
        input.validate()?;

        let password_hash = if input.provider == AuthProvider::Email {
            let password = input
                .password
                .as_deref()
                .ok_or_else(|| AppError::Validation("Password is required".to_string()))?;

            if password.chars().count() < self.min_password_length {
                return Err(AppError::WeakPassword(self.min_password_length));
            }

            Some(hash_password(password)?)
        } else {
            None
        };

        let email = input.email.trim().to_string();
        let email_lower = email.to_lowercase();

        if self.account_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let account_id = self.id_gen.generate();

        let model = account::ActiveModel {
            id: Set(account_id),
            email: Set(email),
            email_lower: Set(email_lower),
            password_hash: Set(password_hash),
            provider: Set(input.provider),
            name: Set(input.name),
            status: Set(AccountStatus::Pending),
            role: Set(Role::User),
            email_verified: Set(false),
            ..Default::default()
        };

        let created = self.account_repo.create(model).await?;

        tracing::info!(account_id = %created.id, "Account registered, awaiting approval");

        Ok(created)
    }

    /// Authenticate by email and password, returning the account and its
    /// API token.
    ///
    /// Checks run in a fixed order: credentials first, then the account
    /// lifecycle, then email verification. A suspended account with a wrong
    /// password reports bad credentials, not suspension.
    pub async fn authenticate(
        &self,
        input: AuthenticateInput,
    ) -> AppResult<(account::Model, String)> {
        input.validate()?;

        let account = self
            .account_repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_hash = account
            .password_hash
            .as_deref()
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&input.password, password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        ensure_active(&account)?;

        if !account.email_verified {
            return Err(AppError::EmailNotVerified);
        }

        // Tokens are stable; one is issued on first successful sign-in.
        if let Some(token) = account.token.clone() {
            return Ok((account, token));
        }

        let token = self.id_gen.generate_token();
        let mut active: account::ActiveModel = account.into();
        active.token = Set(Some(token.clone()));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.account_repo.update(active).await?;

        Ok((updated, token))
    }

    /// Authenticate by API token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<account::Model> {
        let account = self
            .account_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        ensure_active(&account)?;

        Ok(account)
    }

    /// Approve a pending account.
    ///
    /// Idempotent: approving an already-approved account returns it
    /// unchanged. On first approval a placeholder couple is created so the
    /// member can book couple events before linking a partner; failure to
    /// create it never fails the approval.
    pub async fn approve(
        &self,
        reviewer_id: &str,
        account_id: &str,
        input: ReviewInput,
    ) -> AppResult<account::Model> {
        input.validate()?;

        let account = self.account_repo.get_by_id(account_id).await?;

        if account.status == AccountStatus::Approved {
            tracing::info!(account_id, reviewer_id, "Account already approved");
            // Re-approval still heals a couple lost to an earlier failure.
            self.ensure_placeholder_couple(&account.id).await;
            return Ok(account);
        }

        if account.status != AccountStatus::Pending {
            tracing::info!(
                account_id,
                reviewer_id,
                from = %status_name(account.status),
                "Approving account from a non-pending state"
            );
        }

        let now = chrono::Utc::now();
        let mut active: account::ActiveModel = account.into();
        active.status = Set(AccountStatus::Approved);
        active.approved_by = Set(Some(reviewer_id.to_string()));
        active.approved_at = Set(Some(now.into()));
        active.review_note = Set(input.note);
        active.updated_at = Set(Some(now.into()));

        let approved = self.account_repo.update(active).await?;

        self.ensure_placeholder_couple(&approved.id).await;

        tracing::info!(account_id, reviewer_id, "Account approved");

        Ok(approved)
    }

    /// Reject a pending account.
    pub async fn reject(
        &self,
        reviewer_id: &str,
        account_id: &str,
        input: ReviewInput,
    ) -> AppResult<account::Model> {
        input.validate()?;

        let account = self.account_repo.get_by_id(account_id).await?;

        if account.status != AccountStatus::Pending {
            tracing::info!(
                account_id,
                reviewer_id,
                from = %status_name(account.status),
                "Rejecting account from a non-pending state"
            );
        }

        // approved_by/approved_at record approval provenance only; a
        // rejection writes just the status and the reviewer's note.
        let mut active: account::ActiveModel = account.into();
        active.status = Set(AccountStatus::Rejected);
        active.review_note = Set(input.note);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let rejected = self.account_repo.update(active).await?;

        tracing::info!(account_id, reviewer_id, "Account rejected");

        Ok(rejected)
    }

    /// Suspend an account, blocking sign-in until reinstated.
    pub async fn suspend(
        &self,
        actor_id: &str,
        account_id: &str,
        input: ReviewInput,
    ) -> AppResult<account::Model> {
        input.validate()?;

        let account = self.account_repo.get_by_id(account_id).await?;

        let now = chrono::Utc::now();
        let mut active: account::ActiveModel = account.into();
        active.status = Set(AccountStatus::Suspended);
        active.review_note = Set(input.note);
        active.updated_at = Set(Some(now.into()));

        let suspended = self.account_repo.update(active).await?;

        tracing::info!(account_id, actor_id, "Account suspended");

        Ok(suspended)
    }

    /// Set the email-verified flag on an account.
    pub async fn set_email_verified(
        &self,
        account_id: &str,
        verified: bool,
    ) -> AppResult<account::Model> {
        let account = self.account_repo.get_by_id(account_id).await?;

        let mut active: account::ActiveModel = account.into();
        active.email_verified = Set(verified);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.account_repo.update(active).await
    }

    /// Get an account by ID.
    pub async fn get(&self, id: &str) -> AppResult<account::Model> {
        self.account_repo.get_by_id(id).await
    }

    /// List accounts, optionally filtered by status.
    pub async fn list(
        &self,
        status: Option<AccountStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<account::Model>> {
        self.account_repo.list_by_status(status, limit, offset).await
    }

    /// Count accounts with the given status.
    pub async fn count_by_status(&self, status: AccountStatus) -> AppResult<u64> {
        self.account_repo.count_by_status(status).await
    }

    /// Best-effort creation of a self-paired placeholder couple.
    async fn ensure_placeholder_couple(&self, account_id: &str) {
        let existing = match self.couple_repo.find_by_partner(account_id).await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::warn!(account_id, error = %e, "Couple lookup failed after approval");
                return;
            }
        };

        if existing.is_some() {
            return;
        }

        let model = couple::ActiveModel {
            id: Set(self.id_gen.generate()),
            partner_one_id: Set(account_id.to_string()),
            partner_two_id: Set(account_id.to_string()),
            status: Set(CoupleStatus::Active),
            ..Default::default()
        };

        if let Err(e) = self.couple_repo.create(model).await {
            tracing::warn!(account_id, error = %e, "Placeholder couple creation failed");
        }
    }
}

/// Map lifecycle state to its sign-in denial.
fn ensure_active(account: &account::Model) -> AppResult<()> {
    match account.status {
        AccountStatus::Approved => Ok(()),
        AccountStatus::Pending => Err(AppError::AccountPending),
        AccountStatus::Rejected => Err(AppError::AccountRejected),
        AccountStatus::Suspended => Err(AppError::AccountSuspended),
    }
}

const fn status_name(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Pending => "pending",
        AccountStatus::Approved => "approved",
        AccountStatus::Rejected => "rejected",
        AccountStatus::Suspended => "suspended",
    }
}

/// Hash a password using Argon2.
pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
pub(crate) fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
