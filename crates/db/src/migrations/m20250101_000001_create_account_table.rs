//! Create account table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Account::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Account::Email).string_len(256).not_null())
                    .col(ColumnDef::new(Account::EmailLower).string_len(256).not_null())
                    .col(ColumnDef::new(Account::PasswordHash).string_len(256))
                    .col(
                        ColumnDef::new(Account::Provider)
                            .string_len(16)
                            .not_null()
                            .default("email"),
                    )
                    .col(
                        ColumnDef::new(Account::EmailVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Account::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Account::Role).string_len(16).not_null().default("user"))
                    .col(ColumnDef::new(Account::AdminRole).string_len(16))
                    .col(
                        ColumnDef::new(Account::Permissions)
                            .json_binary()
                            .not_null()
                            .default("{}"),
                    )
                    .col(ColumnDef::new(Account::Name).string_len(256))
                    .col(ColumnDef::new(Account::Token).string_len(64))
                    .col(ColumnDef::new(Account::ApprovedBy).string_len(32))
                    .col(ColumnDef::new(Account::ApprovedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Account::ReviewNote).text())
                    .col(ColumnDef::new(Account::AddedBy).string_len(32))
                    .col(
                        ColumnDef::new(Account::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Account::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: email_lower (case-insensitive uniqueness)
        manager
            .create_index(
                Index::create()
                    .name("idx_account_email_lower")
                    .table(Account::Table)
                    .col(Account::EmailLower)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Unique index: token
        manager
            .create_index(
                Index::create()
                    .name("idx_account_token")
                    .table(Account::Table)
                    .col(Account::Token)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: status (for moderation queues)
        manager
            .create_index(
                Index::create()
                    .name("idx_account_status")
                    .table(Account::Table)
                    .col(Account::Status)
                    .to_owned(),
            )
            .await?;

        // Index: created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_account_created_at")
                    .table(Account::Table)
                    .col(Account::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
    Email,
    EmailLower,
    PasswordHash,
    Provider,
    EmailVerified,
    Status,
    Role,
    AdminRole,
    Permissions,
    Name,
    Token,
    ApprovedBy,
    ApprovedAt,
    ReviewNote,
    AddedBy,
    CreatedAt,
    UpdatedAt,
}
