use sea_query::{ColumnDef, Table};

use crate::table::Plan;

pub struct CreateTable;

super::operation!(
    CreateTable,
    Table::create()
        .table(Plan::Table)
        .col(
            ColumnDef::new(Plan::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Plan::Kind).string().not_null())
        .col(ColumnDef::new(Plan::Name).string().not_null())
        .col(ColumnDef::new(Plan::StartDay).integer().not_null())
        .col(ColumnDef::new(Plan::EndDay).integer().not_null())
        .col(ColumnDef::new(Plan::SourcePlanId).string().string_len(26).null())
        .col(ColumnDef::new(Plan::CreatedAt).big_integer().not_null())
        .to_owned(),
    Table::drop().table(Plan::Table).to_owned()
);
