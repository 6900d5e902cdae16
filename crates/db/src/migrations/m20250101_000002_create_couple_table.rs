//! Create couple table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Couple::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Couple::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Couple::PartnerOneId).string_len(32).not_null())
                    .col(ColumnDef::new(Couple::PartnerTwoId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Couple::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Couple::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Couple::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: partner lookups from either side
        manager
            .create_index(
                Index::create()
                    .name("idx_couple_partner_one")
                    .table(Couple::Table)
                    .col(Couple::PartnerOneId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_couple_partner_two")
                    .table(Couple::Table)
                    .col(Couple::PartnerTwoId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Couple::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Couple {
    Table,
    Id,
    PartnerOneId,
    PartnerTwoId,
    Status,
    CreatedAt,
    UpdatedAt,
}
