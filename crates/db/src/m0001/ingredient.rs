use sea_query::{ColumnDef, Index, Table};

use crate::table::Ingredient;

pub struct CreateTable;

super::operation!(
    CreateTable,
    Table::create()
        .table(Ingredient::Table)
        .col(
            ColumnDef::new(Ingredient::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Ingredient::Name).string().not_null())
        .col(ColumnDef::new(Ingredient::Unit).string().not_null())
        .col(ColumnDef::new(Ingredient::Category).string().not_null())
        .col(ColumnDef::new(Ingredient::Calories).double().not_null().default(0))
        .col(ColumnDef::new(Ingredient::Protein).double().not_null().default(0))
        .col(
            ColumnDef::new(Ingredient::Carbohydrates)
                .double()
                .not_null()
                .default(0),
        )
        .col(ColumnDef::new(Ingredient::Fat).double().not_null().default(0))
        .col(ColumnDef::new(Ingredient::CreatedAt).big_integer().not_null())
        .to_owned(),
    Table::drop().table(Ingredient::Table).to_owned()
);

pub struct CreateNameIdx;

super::operation!(
    CreateNameIdx,
    Index::create()
        .name("idx_ingredient_name")
        .table(Ingredient::Table)
        .col(Ingredient::Name)
        .to_owned(),
    Index::drop()
        .name("idx_ingredient_name")
        .table(Ingredient::Table)
        .to_owned()
);
