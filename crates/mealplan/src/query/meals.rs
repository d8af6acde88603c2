use mealbook_db::table::{Plan as PlanTable, PlannedMeal as PlannedMealTable, Recipe};
use mealbook_shared::{
    from_day,
    mealplan::{MealSlot, PlanKind},
    to_day,
};
use sea_query::{Expr, ExprTrait, JoinType, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;
use time::Date;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlannedMeal {
    pub id: String,
    pub plan_id: String,
    pub recipe_id: String,
    pub recipe_name: String,
    /// Servings the recipe yields as written.
    pub servings: u32,
    pub date: Date,
    pub slot: MealSlot,
    pub portions: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayMeals {
    pub date: Date,
    pub meals: Vec<PlannedMeal>,
}

#[derive(FromRow)]
struct PlannedMealRow {
    id: String,
    plan_id: String,
    recipe_id: String,
    #[sqlx(rename = "name")]
    recipe_name: String,
    servings: u32,
    day: i32,
    slot: sqlx::types::Text<MealSlot>,
    portions: u32,
}

impl TryFrom<PlannedMealRow> for PlannedMeal {
    type Error = mealbook_shared::Error;

    fn try_from(row: PlannedMealRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            plan_id: row.plan_id,
            recipe_id: row.recipe_id,
            recipe_name: row.recipe_name,
            servings: row.servings,
            date: from_day(row.day)?,
            slot: row.slot.0,
            portions: row.portions,
        })
    }
}

fn select_meals() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            (PlannedMealTable::Table, PlannedMealTable::Id),
            (PlannedMealTable::Table, PlannedMealTable::PlanId),
            (PlannedMealTable::Table, PlannedMealTable::RecipeId),
        ])
        .columns([(Recipe::Table, Recipe::Name), (Recipe::Table, Recipe::Servings)])
        .columns([
            (PlannedMealTable::Table, PlannedMealTable::Day),
            (PlannedMealTable::Table, PlannedMealTable::Slot),
            (PlannedMealTable::Table, PlannedMealTable::Portions),
        ])
        .from(PlannedMealTable::Table)
        .join(
            JoinType::InnerJoin,
            Recipe::Table,
            Expr::col((PlannedMealTable::Table, PlannedMealTable::RecipeId))
                .equals((Recipe::Table, Recipe::Id)),
        )
        .order_by((PlannedMealTable::Table, PlannedMealTable::Day), Order::Asc)
        .order_by(
            (PlannedMealTable::Table, PlannedMealTable::SlotRank),
            Order::Asc,
        )
        .order_by((PlannedMealTable::Table, PlannedMealTable::Id), Order::Asc)
        .to_owned()
}

impl super::Query {
    async fn fetch_meals(
        &self,
        statement: SelectStatement,
    ) -> mealbook_shared::Result<Vec<PlannedMeal>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, PlannedMealRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter().map(PlannedMeal::try_from).collect()
    }

    /// Meals of one plan ordered by date and slot.
    pub async fn meals(
        &self,
        plan_id: impl Into<String>,
    ) -> mealbook_shared::Result<Vec<PlannedMeal>> {
        let mut statement = select_meals();
        statement.and_where(
            Expr::col((PlannedMealTable::Table, PlannedMealTable::PlanId)).eq(plan_id.into()),
        );

        self.fetch_meals(statement).await
    }

    /// Meals of every planner, or of `plan_id` only, between two dates included.
    pub async fn meals_between(
        &self,
        plan_id: Option<&str>,
        start: Date,
        end: Date,
    ) -> mealbook_shared::Result<Vec<PlannedMeal>> {
        let mut statement = select_meals();
        statement
            .join(
                JoinType::InnerJoin,
                PlanTable::Table,
                Expr::col((PlannedMealTable::Table, PlannedMealTable::PlanId))
                    .equals((PlanTable::Table, PlanTable::Id)),
            )
            .and_where(
                Expr::col((PlanTable::Table, PlanTable::Kind)).eq(PlanKind::Planner.to_string()),
            )
            .and_where(
                Expr::col((PlannedMealTable::Table, PlannedMealTable::Day)).gte(to_day(start)),
            )
            .and_where(
                Expr::col((PlannedMealTable::Table, PlannedMealTable::Day)).lte(to_day(end)),
            );

        if let Some(plan_id) = plan_id {
            statement.and_where(
                Expr::col((PlannedMealTable::Table, PlannedMealTable::PlanId)).eq(plan_id),
            );
        }

        self.fetch_meals(statement).await
    }

    /// One entry per date of the plan, empty days included.
    pub async fn days(
        &self,
        plan_id: impl Into<String>,
    ) -> mealbook_shared::Result<Option<Vec<DayMeals>>> {
        let plan_id = plan_id.into();
        let Some(plan) = self.find(&plan_id).await? else {
            return Ok(None);
        };

        let mut meals = self.meals(&plan_id).await?.into_iter().peekable();
        let mut days = vec![];

        for date in plan.dates() {
            let mut day = DayMeals {
                date,
                meals: vec![],
            };

            while let Some(meal) = meals.next_if(|m| m.date <= date) {
                if meal.date == date {
                    day.meals.push(meal);
                }
            }

            days.push(day);
        }

        Ok(Some(days))
    }
}
