use sea_query::{ColumnDef, Index, Table};

use crate::table::ShoppingListItem;

pub struct CreateTable;

super::operation!(
    CreateTable,
    Table::create()
        .table(ShoppingListItem::Table)
        .col(
            ColumnDef::new(ShoppingListItem::PlanId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(ShoppingListItem::IngredientId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Checked)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(ShoppingListItem::Quantity).double().null())
        .primary_key(
            Index::create()
                .col(ShoppingListItem::PlanId)
                .col(ShoppingListItem::IngredientId),
        )
        .to_owned(),
    Table::drop().table(ShoppingListItem::Table).to_owned()
);
