//! Create booking table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Booking::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Booking::EventId).string_len(32).not_null())
                    .col(ColumnDef::new(Booking::AccountId).string_len(32).not_null())
                    .col(ColumnDef::new(Booking::CoupleId).string_len(32))
                    .col(ColumnDef::new(Booking::PartySize).integer().not_null().default(2))
                    .col(
                        ColumnDef::new(Booking::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Booking::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Booking::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_event")
                            .from(Booking::Table, Booking::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_account")
                            .from(Booking::Table, Booking::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: event_id (capacity checks)
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_event_id")
                    .table(Booking::Table)
                    .col(Booking::EventId)
                    .to_owned(),
            )
            .await?;

        // Index: account_id
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_account_id")
                    .table(Booking::Table)
                    .col(Booking::AccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Booking {
    Table,
    Id,
    EventId,
    AccountId,
    CoupleId,
    PartySize,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Event {
    Table,
    Id,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}
