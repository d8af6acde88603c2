use sea_query::{ColumnDef, Index, Table};

use crate::table::PlannedMeal;

pub struct CreateTable;

super::operation!(
    CreateTable,
    Table::create()
        .table(PlannedMeal::Table)
        .col(
            ColumnDef::new(PlannedMeal::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(PlannedMeal::PlanId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(PlannedMeal::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(PlannedMeal::Day).integer().not_null())
        .col(ColumnDef::new(PlannedMeal::Slot).string().not_null())
        .col(ColumnDef::new(PlannedMeal::SlotRank).integer().not_null())
        .col(ColumnDef::new(PlannedMeal::Portions).integer().not_null())
        .to_owned(),
    Table::drop().table(PlannedMeal::Table).to_owned()
);

pub struct CreatePlanDayIdx;

super::operation!(
    CreatePlanDayIdx,
    Index::create()
        .name("idx_planned_meal_plan_id_day")
        .table(PlannedMeal::Table)
        .col(PlannedMeal::PlanId)
        .col(PlannedMeal::Day)
        .to_owned(),
    Index::drop()
        .name("idx_planned_meal_plan_id_day")
        .table(PlannedMeal::Table)
        .to_owned()
);
