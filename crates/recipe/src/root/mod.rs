mod create;
mod delete;
mod duplicate;
mod ingredients;
mod update;

pub use create::{CreateInput, IngredientLine};
pub use update::UpdateInput;

pub(crate) use delete::delete_recipe;

use mealbook_db::table::{Ingredient, Recipe, RecipeIngredient};
use mealbook_shared::recipe::{IngredientCategory, Nutrition, Unit};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, prelude::FromRow};
use std::{collections::HashSet, ops::Deref};

#[derive(Clone)]
pub struct Command {
    state: mealbook_shared::State,
}

impl Deref for Command {
    type Target = mealbook_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: mealbook_shared::State) -> Self {
        Self { state }
    }
}

#[derive(FromRow)]
pub(crate) struct LineRow {
    pub position: u32,
    pub ingredient_id: String,
    pub quantity: f64,
    pub note: Option<String>,
    pub name: String,
    pub unit: sqlx::types::Text<Unit>,
    pub category: sqlx::types::Text<IngredientCategory>,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

impl LineRow {
    pub fn nutrition(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            protein: self.protein,
            carbohydrates: self.carbohydrates,
            fat: self.fat,
        }
    }
}

/// Ingredient lines of a recipe joined with the catalog, in position order.
pub(crate) async fn load_lines(
    conn: &mut SqliteConnection,
    recipe_id: &str,
) -> anyhow::Result<Vec<LineRow>> {
    let (sql, values) = Query::select()
        .columns([
            (RecipeIngredient::Table, RecipeIngredient::Position),
            (RecipeIngredient::Table, RecipeIngredient::IngredientId),
            (RecipeIngredient::Table, RecipeIngredient::Quantity),
            (RecipeIngredient::Table, RecipeIngredient::Note),
        ])
        .columns([
            (Ingredient::Table, Ingredient::Name),
            (Ingredient::Table, Ingredient::Unit),
            (Ingredient::Table, Ingredient::Category),
            (Ingredient::Table, Ingredient::Calories),
            (Ingredient::Table, Ingredient::Protein),
            (Ingredient::Table, Ingredient::Carbohydrates),
            (Ingredient::Table, Ingredient::Fat),
        ])
        .from(RecipeIngredient::Table)
        .join(
            sea_query::JoinType::InnerJoin,
            Ingredient::Table,
            Expr::col((RecipeIngredient::Table, RecipeIngredient::IngredientId))
                .equals((Ingredient::Table, Ingredient::Id)),
        )
        .and_where(Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId)).eq(recipe_id))
        .order_by((RecipeIngredient::Table, RecipeIngredient::Position), Order::Asc)
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, LineRow, _>(&sql, values)
        .fetch_all(&mut *conn)
        .await?)
}

/// Recomputes and stores the nutrition totals of one recipe.
pub(crate) async fn refresh_totals(
    conn: &mut SqliteConnection,
    recipe_id: &str,
) -> anyhow::Result<Nutrition> {
    let lines = load_lines(conn, recipe_id).await?;
    let totals = crate::nutrition::totals(
        lines
            .iter()
            .map(|line| (line.unit.0, line.nutrition(), line.quantity)),
    );

    let (sql, values) = Query::update()
        .table(Recipe::Table)
        .values([
            (Recipe::Calories, totals.calories.into()),
            (Recipe::Protein, totals.protein.into()),
            (Recipe::Carbohydrates, totals.carbohydrates.into()),
            (Recipe::Fat, totals.fat.into()),
            (Recipe::UpdatedAt, mealbook_shared::now().into()),
        ])
        .and_where(Expr::col(Recipe::Id).eq(recipe_id))
        .build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(totals)
}

/// Refreshes every recipe that has a line for `ingredient_id`, returns how many.
pub(crate) async fn refresh_recipes_using(
    conn: &mut SqliteConnection,
    ingredient_id: &str,
) -> anyhow::Result<usize> {
    let (sql, values) = Query::select()
        .column(RecipeIngredient::RecipeId)
        .distinct()
        .from(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::IngredientId).eq(ingredient_id))
        .build_sqlx(SqliteQueryBuilder);

    let recipe_ids = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_all(&mut *conn)
        .await?;

    for (recipe_id,) in recipe_ids.iter() {
        refresh_totals(conn, recipe_id).await?;
    }

    Ok(recipe_ids.len())
}

pub(crate) async fn recipe_exists(
    conn: &mut SqliteConnection,
    recipe_id: &str,
) -> anyhow::Result<bool> {
    let (sql, values) = Query::select()
        .column(Recipe::Id)
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(recipe_id))
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?
        .is_some())
}

/// Rejects lines with unknown ingredients or non-positive quantities.
pub(crate) async fn check_lines(
    conn: &mut SqliteConnection,
    lines: &[IngredientLine],
) -> mealbook_shared::Result<()> {
    if let Some(line) = lines
        .iter()
        .find(|l| !l.quantity.is_finite() || l.quantity <= 0.0)
    {
        mealbook_shared::user!(
            "quantity for ingredient {} must be greater than 0",
            line.ingredient_id
        );
    }

    let ids = lines
        .iter()
        .map(|l| l.ingredient_id.to_owned())
        .collect::<HashSet<_>>();
    let found = crate::ingredient::load_many(conn, ids.iter().cloned().collect())
        .await?
        .into_iter()
        .map(|i| i.id)
        .collect::<HashSet<_>>();

    if let Some(missing) = ids.difference(&found).next() {
        mealbook_shared::not_found!("ingredient {missing}");
    }

    Ok(())
}

/// Replaces every line of a recipe, positions follow slice order.
pub(crate) async fn write_lines(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    lines: &[IngredientLine],
) -> anyhow::Result<()> {
    let (sql, values) = Query::delete()
        .from_table(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    if lines.is_empty() {
        return Ok(());
    }

    let mut statement = Query::insert()
        .into_table(RecipeIngredient::Table)
        .columns([
            RecipeIngredient::RecipeId,
            RecipeIngredient::Position,
            RecipeIngredient::IngredientId,
            RecipeIngredient::Quantity,
            RecipeIngredient::Note,
        ])
        .to_owned();

    for (position, line) in lines.iter().enumerate() {
        let note = line
            .note
            .as_ref()
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());

        statement.values_panic([
            recipe_id.into(),
            (position as u32).into(),
            line.ingredient_id.to_owned().into(),
            line.quantity.into(),
            note.into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}
