//! Reports service: aggregate counts for the admin dashboard.

use pairly_common::AppResult;
use pairly_db::{
    entities::{account, account::AccountStatus, booking::BookingStatus},
    repositories::{
        AccountRepository, BookingRepository, CoupleRepository, EventRepository, OrderRepository,
        ProductRepository,
    },
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::services::authorize::{Capability, authorize};

/// Reports service.
#[derive(Clone)]
pub struct ReportsService {
    account_repo: AccountRepository,
    couple_repo: CoupleRepository,
    product_repo: ProductRepository,
    event_repo: EventRepository,
    order_repo: OrderRepository,
    booking_repo: BookingRepository,
}

/// Dashboard summary figures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub pending_accounts: u64,
    pub approved_accounts: u64,
    pub suspended_accounts: u64,
    pub total_couples: u64,
    pub total_products: u64,
    pub total_events: u64,
    pub total_orders: u64,
    pub total_revenue: Decimal,
    pub confirmed_bookings: u64,
}

impl ReportsService {
    /// Create a new reports service.
    #[must_use]
    pub const fn new(
        account_repo: AccountRepository,
        couple_repo: CoupleRepository,
        product_repo: ProductRepository,
        event_repo: EventRepository,
        order_repo: OrderRepository,
        booking_repo: BookingRepository,
    ) -> Self {
        Self {
            account_repo,
            couple_repo,
            product_repo,
            event_repo,
            order_repo,
            booking_repo,
        }
    }

    /// Build the dashboard summary.
    pub async fn summary(&self, actor: &account::Model) -> AppResult<ReportSummary> {
        authorize(actor, Capability::ViewReports)?;

        Ok(ReportSummary {
            pending_accounts: self
                .account_repo
                .count_by_status(AccountStatus::Pending)
                .await?,
            approved_accounts: self
                .account_repo
                .count_by_status(AccountStatus::Approved)
                .await?,
            suspended_accounts: self
                .account_repo
                .count_by_status(AccountStatus::Suspended)
                .await?,
            total_couples: self.couple_repo.count().await?,
            total_products: self.product_repo.count().await?,
            total_events: self.event_repo.count().await?,
            total_orders: self.order_repo.count().await?,
            total_revenue: self.order_repo.total_revenue().await?,
            confirmed_bookings: self
                .booking_repo
                .count_by_status(BookingStatus::Confirmed)
                .await?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pairly_common::AppError;
    use pairly_db::entities::account::{AuthProvider, PermissionSet, Role};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    #[tokio::test]
    async fn test_summary_requires_view_reports() {
        let service = ReportsService::new(
            AccountRepository::new(empty_db()),
            CoupleRepository::new(empty_db()),
            ProductRepository::new(empty_db()),
            EventRepository::new(empty_db()),
            OrderRepository::new(empty_db()),
            BookingRepository::new(empty_db()),
        );

        let actor = account::Model {
            id: "acct1".to_string(),
            email: "member@example.com".to_string(),
            email_lower: "member@example.com".to_string(),
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
        };

        let result = service.summary(&actor).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
