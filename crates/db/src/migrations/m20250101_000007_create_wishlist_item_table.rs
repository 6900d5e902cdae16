//! Create wishlist_item table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WishlistItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WishlistItem::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WishlistItem::AccountId).string_len(32).not_null())
                    .col(ColumnDef::new(WishlistItem::ProductId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(WishlistItem::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_item_account")
                            .from(WishlistItem::Table, WishlistItem::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_item_product")
                            .from(WishlistItem::Table, WishlistItem::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one entry per (account, product)
        manager
            .create_index(
                Index::create()
                    .name("idx_wishlist_item_account_product")
                    .table(WishlistItem::Table)
                    .col(WishlistItem::AccountId)
                    .col(WishlistItem::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WishlistItem::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WishlistItem {
    Table,
    Id,
    AccountId,
    ProductId,
    CreatedAt,
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
}

#[derive(Iden)]
enum Product {
    Table,
    Id,
}
