use sea_query::{ColumnDef, Index, Table};

use crate::table::Recipe;

pub struct CreateTable;

super::operation!(
    CreateTable,
    Table::create()
        .table(Recipe::Table)
        .col(
            ColumnDef::new(Recipe::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Recipe::FolderId).string().string_len(26).null())
        .col(ColumnDef::new(Recipe::Name).string().not_null())
        .col(ColumnDef::new(Recipe::Description).text().not_null().default(""))
        .col(ColumnDef::new(Recipe::Servings).integer().not_null().default(1))
        .col(ColumnDef::new(Recipe::Instructions).text().not_null().default(""))
        .col(ColumnDef::new(Recipe::SourceUrl).string().null())
        .col(ColumnDef::new(Recipe::Calories).double().not_null().default(0))
        .col(ColumnDef::new(Recipe::Protein).double().not_null().default(0))
        .col(
            ColumnDef::new(Recipe::Carbohydrates)
                .double()
                .not_null()
                .default(0),
        )
        .col(ColumnDef::new(Recipe::Fat).double().not_null().default(0))
        .col(ColumnDef::new(Recipe::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Recipe::UpdatedAt).big_integer().null())
        .to_owned(),
    Table::drop().table(Recipe::Table).to_owned()
);

pub struct CreateFolderIdx;

super::operation!(
    CreateFolderIdx,
    Index::create()
        .name("idx_recipe_folder_id")
        .table(Recipe::Table)
        .col(Recipe::FolderId)
        .to_owned(),
    Index::drop()
        .name("idx_recipe_folder_id")
        .table(Recipe::Table)
        .to_owned()
);
