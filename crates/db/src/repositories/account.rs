//! Account repository.

use std::sync::Arc;

use crate::entities::{Account, account};
use pairly_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Account repository for database operations.
#[derive(Clone)]
pub struct AccountRepository {
    db: Arc<DatabaseConnection>,
}

impl AccountRepository {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<account::Model>> {
        Account::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an account by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<account::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::AccountNotFound(id.to_string()))
    }

    /// Find an account by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<account::Model>> {
        Account::find()
            .filter(account::Column::EmailLower.eq(email.trim().to_lowercase()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an account by bearer token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<account::Model>> {
        Account::find()
            .filter(account::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new account.
    pub async fn create(&self, model: account::ActiveModel) -> AppResult<account::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an account.
    pub async fn update(&self, model: account::ActiveModel) -> AppResult<account::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List accounts, optionally filtered by lifecycle status (paginated).
    pub async fn list_by_status(
        &self,
        status: Option<account::AccountStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<account::Model>> {
        let mut query = Account::find().order_by_desc(account::Column::CreatedAt);

        if let Some(s) = status {
            query = query.filter(account::Column::Status.eq(s));
        }

        query
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List admin-team accounts.
    pub async fn list_admins(&self) -> AppResult<Vec<account::Model>> {
        Account::find()
            .filter(account::Column::Role.eq(account::Role::Admin))
            .order_by_desc(account::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count accounts with the given lifecycle status.
    pub async fn count_by_status(&self, status: account::AccountStatus) -> AppResult<u64> {
        Account::find()
            .filter(account::Column::Status.eq(status))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::account::{
        AccountStatus, AuthProvider, PermissionSet, Role,
    };
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};
    use std::sync::Arc;

    fn create_test_account(id: &str, email: &str) -> account::Model {
        account::Model {
            id: id.to_string(),
            email: email.to_string(),
            email_lower: email.to_lowercase(),
            password_hash: Some("$argon2id$test".to_string()),
            provider: AuthProvider::Email,
            email_verified: false,
            status: AccountStatus::Pending,
            role: Role::User,
            admin_role: None,
            permissions: PermissionSet::default(),
            name: Some("Test Account".to_string()),
            token: Some("test_token".to_string()),
            approved_by: None,
            approved_at: None,
            review_note: None,
            added_by: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_email_found() {
        let acct = create_test_account("acct1", "Alice@Example.com");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[acct.clone()]])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);
        let result = repo.find_by_email("alice@example.COM").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, "acct1");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<account::Model>::new()])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(result.is_err());
        match result {
            Err(AppError::AccountNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected AccountNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_token() {
        let acct = create_test_account("acct1", "bob@example.com");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[acct.clone()]])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);
        let result = repo.find_by_token("test_token").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().token, Some("test_token".to_string()));
    }

    #[tokio::test]
    async fn test_create_account() {
        let acct = create_test_account("acct1", "carol@example.com");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[acct.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);

        let active = account::ActiveModel {
            id: Set("acct1".to_string()),
            email: Set("carol@example.com".to_string()),
            email_lower: Set("carol@example.com".to_string()),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.email, "carol@example.com");
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let a1 = create_test_account("a1", "a1@example.com");
        let a2 = create_test_account("a2", "a2@example.com");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[a1, a2]])
                .into_connection(),
        );

        let repo = AccountRepository::new(db);
        let result = repo
            .list_by_status(Some(AccountStatus::Pending), 10, 0)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }
}
