mod aggregation;
mod query;
mod root;

pub use aggregation::*;
pub use query::*;
pub use root::*;

use mealbook_db::table::{Ingredient, RecipeIngredient};
use mealbook_mealplan::Plan;
use mealbook_shared::recipe::{IngredientCategory, Unit};
use sea_query::{Expr, ExprTrait, JoinType, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use std::collections::HashMap;

#[derive(FromRow)]
struct RecipeLineRow {
    recipe_id: String,
    ingredient_id: String,
    quantity: f64,
    name: String,
    unit: sqlx::types::Text<Unit>,
    category: sqlx::types::Text<IngredientCategory>,
}

/// Ingredient lines of every meal a shopping list covers.
///
/// A list generated from a planner only reads that planner; a detached list
/// reads every planner over its date range.
pub async fn requirements(
    state: &mealbook_shared::State,
    list: &Plan,
) -> mealbook_shared::Result<Vec<Requirement>> {
    let meals = mealbook_mealplan::Query(state.clone())
        .meals_between(list.source_plan_id.as_deref(), list.start, list.end)
        .await?;

    if meals.is_empty() {
        return Ok(vec![]);
    }

    let mut recipe_ids = meals
        .iter()
        .map(|m| m.recipe_id.to_owned())
        .collect::<Vec<_>>();
    recipe_ids.sort();
    recipe_ids.dedup();

    let (sql, values) = sea_query::Query::select()
        .columns([
            (RecipeIngredient::Table, RecipeIngredient::RecipeId),
            (RecipeIngredient::Table, RecipeIngredient::IngredientId),
            (RecipeIngredient::Table, RecipeIngredient::Quantity),
        ])
        .columns([
            (Ingredient::Table, Ingredient::Name),
            (Ingredient::Table, Ingredient::Unit),
            (Ingredient::Table, Ingredient::Category),
        ])
        .from(RecipeIngredient::Table)
        .join(
            JoinType::InnerJoin,
            Ingredient::Table,
            Expr::col((RecipeIngredient::Table, RecipeIngredient::IngredientId))
                .equals((Ingredient::Table, Ingredient::Id)),
        )
        .and_where(
            Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId)).is_in(recipe_ids),
        )
        .order_by(
            (RecipeIngredient::Table, RecipeIngredient::Position),
            Order::Asc,
        )
        .build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, RecipeLineRow, _>(&sql, values)
        .fetch_all(&state.read_db)
        .await?;

    let mut lines: HashMap<String, Vec<RecipeLineRow>> = HashMap::new();
    for row in rows {
        lines.entry(row.recipe_id.to_owned()).or_default().push(row);
    }

    let mut requirements = vec![];
    for meal in meals.iter() {
        let Some(recipe_lines) = lines.get(&meal.recipe_id) else {
            continue;
        };

        for line in recipe_lines {
            requirements.push(Requirement {
                ingredient: ListIngredient {
                    id: line.ingredient_id.to_owned(),
                    name: line.name.to_owned(),
                    unit: line.unit.0,
                    category: line.category.0,
                },
                recipe_name: meal.recipe_name.to_owned(),
                quantity: line.quantity,
                servings: meal.servings,
                portions: meal.portions,
            });
        }
    }

    Ok(requirements)
}
