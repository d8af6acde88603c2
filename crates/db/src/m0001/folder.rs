use sea_query::{ColumnDef, Index, Table};

use crate::table::Folder;

pub struct CreateTable;

super::operation!(
    CreateTable,
    Table::create()
        .table(Folder::Table)
        .col(
            ColumnDef::new(Folder::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Folder::ParentId).string().string_len(26).null())
        .col(ColumnDef::new(Folder::Name).string().not_null())
        .col(ColumnDef::new(Folder::CreatedAt).big_integer().not_null())
        .to_owned(),
    Table::drop().table(Folder::Table).to_owned()
);

pub struct CreateParentIdx;

super::operation!(
    CreateParentIdx,
    Index::create()
        .name("idx_folder_parent_id")
        .table(Folder::Table)
        .col(Folder::ParentId)
        .to_owned(),
    Index::drop()
        .name("idx_folder_parent_id")
        .table(Folder::Table)
        .to_owned()
);
