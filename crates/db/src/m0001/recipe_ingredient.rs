use sea_query::{ColumnDef, Index, Table};

use crate::table::RecipeIngredient;

pub struct CreateTable;

super::operation!(
    CreateTable,
    Table::create()
        .table(RecipeIngredient::Table)
        .col(
            ColumnDef::new(RecipeIngredient::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(RecipeIngredient::Position).integer().not_null())
        .col(
            ColumnDef::new(RecipeIngredient::IngredientId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(RecipeIngredient::Quantity).double().not_null())
        .col(ColumnDef::new(RecipeIngredient::Note).string().null())
        .primary_key(
            Index::create()
                .col(RecipeIngredient::RecipeId)
                .col(RecipeIngredient::Position),
        )
        .to_owned(),
    Table::drop().table(RecipeIngredient::Table).to_owned()
);

pub struct CreateIngredientIdx;

super::operation!(
    CreateIngredientIdx,
    Index::create()
        .name("idx_recipe_ingredient_ingredient_id")
        .table(RecipeIngredient::Table)
        .col(RecipeIngredient::IngredientId)
        .to_owned(),
    Index::drop()
        .name("idx_recipe_ingredient_ingredient_id")
        .table(RecipeIngredient::Table)
        .to_owned()
);
