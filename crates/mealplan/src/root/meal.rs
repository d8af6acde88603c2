use mealbook_db::table::{PlannedMeal, Recipe};
use mealbook_shared::{
    format_date,
    mealplan::{MealSlot, PlanKind},
    to_day,
};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::{SqliteConnection, prelude::FromRow};
use time::Date;
use ulid::Ulid;
use validator::Validate;

use crate::Plan;

fn default_portions() -> u32 {
    1
}

#[derive(Validate, Clone, Debug, Deserialize)]
pub struct AddMealInput {
    pub recipe_id: String,
    pub date: Date,
    #[serde(default)]
    pub slot: MealSlot,
    #[serde(default = "default_portions")]
    #[validate(range(min = 1, max = 50))]
    pub portions: u32,
}

#[derive(Validate, Clone, Debug, Deserialize)]
pub struct UpdateMealInput {
    pub date: Date,
    pub slot: MealSlot,
    #[validate(range(min = 1, max = 50))]
    pub portions: u32,
}

#[derive(FromRow)]
struct MealRow {
    plan_id: String,
    recipe_id: String,
    slot: sqlx::types::Text<MealSlot>,
    portions: u32,
}

fn check_date(plan: &Plan, date: Date) -> mealbook_shared::Result<()> {
    if !plan.contains(date) {
        mealbook_shared::user!(
            "{} is outside '{}' ({} to {})",
            format_date(date),
            plan.name,
            format_date(plan.start),
            format_date(plan.end)
        );
    }

    Ok(())
}

async fn recipe_exists(conn: &mut SqliteConnection, id: &str) -> anyhow::Result<bool> {
    let (sql, values) = Query::select()
        .column(Recipe::Id)
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?
        .is_some())
}

async fn insert_meal(
    conn: &mut SqliteConnection,
    plan_id: &str,
    recipe_id: &str,
    date: Date,
    slot: MealSlot,
    portions: u32,
) -> anyhow::Result<String> {
    let id = Ulid::new().to_string();
    let (sql, values) = Query::insert()
        .into_table(PlannedMeal::Table)
        .columns([
            PlannedMeal::Id,
            PlannedMeal::PlanId,
            PlannedMeal::RecipeId,
            PlannedMeal::Day,
            PlannedMeal::Slot,
            PlannedMeal::SlotRank,
            PlannedMeal::Portions,
        ])
        .values_panic([
            id.to_owned().into(),
            plan_id.into(),
            recipe_id.into(),
            to_day(date).into(),
            slot.to_string().into(),
            slot.rank().into(),
            portions.into(),
        ])
        .build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(id)
}

async fn load_meal(conn: &mut SqliteConnection, id: &str) -> anyhow::Result<Option<MealRow>> {
    let (sql, values) = Query::select()
        .columns([
            PlannedMeal::PlanId,
            PlannedMeal::RecipeId,
            PlannedMeal::Slot,
            PlannedMeal::Portions,
        ])
        .from(PlannedMeal::Table)
        .and_where(Expr::col(PlannedMeal::Id).eq(id))
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, MealRow, _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?)
}

impl super::Command {
    pub async fn add_meal(
        &self,
        plan_id: impl Into<String>,
        input: AddMealInput,
    ) -> mealbook_shared::Result<String> {
        let plan_id = plan_id.into();
        input.validate()?;

        let mut tx = self.write_db.begin().await?;
        let plan = crate::load_plan_of_kind(&mut tx, &plan_id, PlanKind::Planner).await?;
        check_date(&plan, input.date)?;

        if !recipe_exists(&mut tx, &input.recipe_id).await? {
            mealbook_shared::not_found!("recipe {}", input.recipe_id);
        }

        let id = insert_meal(
            &mut tx,
            &plan_id,
            &input.recipe_id,
            input.date,
            input.slot,
            input.portions,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            plan.id = %plan_id,
            meal.id = %id,
            date = %format_date(input.date),
            slot = %input.slot,
            "meal planned"
        );

        Ok(id)
    }

    pub async fn update_meal(
        &self,
        meal_id: impl Into<String>,
        input: UpdateMealInput,
    ) -> mealbook_shared::Result<()> {
        let meal_id = meal_id.into();
        input.validate()?;

        let mut tx = self.write_db.begin().await?;
        let Some(meal) = load_meal(&mut tx, &meal_id).await? else {
            mealbook_shared::not_found!("meal {meal_id}");
        };

        let plan = crate::load_plan_of_kind(&mut tx, &meal.plan_id, PlanKind::Planner).await?;
        check_date(&plan, input.date)?;

        let (sql, values) = Query::update()
            .table(PlannedMeal::Table)
            .values([
                (PlannedMeal::Day, to_day(input.date).into()),
                (PlannedMeal::Slot, input.slot.to_string().into()),
                (PlannedMeal::SlotRank, input.slot.rank().into()),
                (PlannedMeal::Portions, input.portions.into()),
            ])
            .and_where(Expr::col(PlannedMeal::Id).eq(&meal_id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(())
    }

    pub async fn remove_meal(&self, meal_id: impl Into<String>) -> mealbook_shared::Result<()> {
        let meal_id = meal_id.into();
        let (sql, values) = Query::delete()
            .from_table(PlannedMeal::Table)
            .and_where(Expr::col(PlannedMeal::Id).eq(&meal_id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            mealbook_shared::not_found!("meal {meal_id}");
        }

        Ok(())
    }

    /// Duplicates every meal of `from` onto `to`, returns how many were copied.
    pub async fn copy_day(
        &self,
        plan_id: impl Into<String>,
        from: Date,
        to: Date,
    ) -> mealbook_shared::Result<usize> {
        let plan_id = plan_id.into();

        if from == to {
            mealbook_shared::user!("a day cannot be copied onto itself");
        }

        let mut tx = self.write_db.begin().await?;
        let plan = crate::load_plan_of_kind(&mut tx, &plan_id, PlanKind::Planner).await?;
        check_date(&plan, from)?;
        check_date(&plan, to)?;

        let (sql, values) = Query::select()
            .columns([
                PlannedMeal::PlanId,
                PlannedMeal::RecipeId,
                PlannedMeal::Slot,
                PlannedMeal::Portions,
            ])
            .from(PlannedMeal::Table)
            .and_where(Expr::col(PlannedMeal::PlanId).eq(&plan_id))
            .and_where(Expr::col(PlannedMeal::Day).eq(to_day(from)))
            .order_by(PlannedMeal::SlotRank, sea_query::Order::Asc)
            .order_by(PlannedMeal::Id, sea_query::Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let meals = sqlx::query_as_with::<_, MealRow, _>(&sql, values)
            .fetch_all(&mut *tx)
            .await?;

        for meal in meals.iter() {
            insert_meal(
                &mut tx,
                &meal.plan_id,
                &meal.recipe_id,
                to,
                meal.slot.0,
                meal.portions,
            )
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            plan.id = %plan_id,
            from = %format_date(from),
            to = %format_date(to),
            meals = meals.len(),
            "day copied"
        );

        Ok(meals.len())
    }
}

