mod create;
mod delete;
mod update;

pub use create::CreateIngredientInput;
pub use update::UpdateIngredientInput;

use mealbook_db::table::Ingredient as IngredientTable;
use mealbook_shared::{
    name_contains, normalize_name,
    recipe::{IngredientCategory, Nutrition, Unit},
};
use sea_query::{Expr, ExprTrait, Order, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteConnection, prelude::FromRow};
use std::ops::Deref;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub unit: Unit,
    pub category: IngredientCategory,
    /// Per 100 g/ml, or per piece.
    pub nutrition: Nutrition,
}

#[derive(FromRow)]
pub(crate) struct IngredientRow {
    pub id: String,
    pub name: String,
    pub unit: sqlx::types::Text<Unit>,
    pub category: sqlx::types::Text<IngredientCategory>,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            unit: row.unit.0,
            category: row.category.0,
            nutrition: Nutrition {
                calories: row.calories,
                protein: row.protein,
                carbohydrates: row.carbohydrates,
                fat: row.fat,
            },
        }
    }
}

const COLUMNS: [IngredientTable; 8] = [
    IngredientTable::Id,
    IngredientTable::Name,
    IngredientTable::Unit,
    IngredientTable::Category,
    IngredientTable::Calories,
    IngredientTable::Protein,
    IngredientTable::Carbohydrates,
    IngredientTable::Fat,
];

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

#[derive(Clone)]
pub struct Query(pub mealbook_shared::State);

impl Deref for Query {
    type Target = mealbook_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<Ingredient>> {
        let (sql, values) = SeaQuery::select()
            .columns(COLUMNS)
            .from(IngredientTable::Table)
            .and_where(Expr::col(IngredientTable::Id).eq(id.into()))
            .build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Case-insensitive lookup on the whole name.
    pub async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<Ingredient>> {
        let mut conn = self.read_db.acquire().await?;
        let id = find_id_by_name(&mut conn, name, None).await?;
        drop(conn);

        match id {
            Some(id) => self.find(id).await,
            None => Ok(None),
        }
    }

    pub async fn list(&self, search: Option<&str>) -> anyhow::Result<Vec<Ingredient>> {
        let (sql, values) = SeaQuery::select()
            .columns(COLUMNS)
            .from(IngredientTable::Table)
            .order_by(IngredientTable::Id, Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let mut ingredients = rows
            .into_iter()
            .map(Ingredient::from)
            .filter(|i| search.is_none_or(|s| name_contains(&i.name, s)))
            .collect::<Vec<_>>();

        ingredients.sort_by_cached_key(|i| (normalize_name(&i.name), i.id.to_owned()));

        Ok(ingredients)
    }

    /// `(id, name)` pairs used to build an import matcher.
    pub async fn names(&self) -> anyhow::Result<Vec<(String, String)>> {
        let (sql, values) = SeaQuery::select()
            .columns([IngredientTable::Id, IngredientTable::Name])
            .from(IngredientTable::Table)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, (String, String), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }
}

/// Loads catalog rows for the given ids, in no particular order.
pub(crate) async fn load_many(
    conn: &mut SqliteConnection,
    ids: Vec<String>,
) -> anyhow::Result<Vec<Ingredient>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let (sql, values) = SeaQuery::select()
        .columns(COLUMNS)
        .from(IngredientTable::Table)
        .and_where(Expr::col(IngredientTable::Id).is_in(ids))
        .build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Names are compared in their normalized form, SQLite only folds ASCII case.
pub(crate) async fn find_id_by_name(
    conn: &mut SqliteConnection,
    name: &str,
    exclude_id: Option<&str>,
) -> anyhow::Result<Option<String>> {
    let wanted = normalize_name(name);
    let (sql, values) = SeaQuery::select()
        .columns([IngredientTable::Id, IngredientTable::Name])
        .from(IngredientTable::Table)
        .order_by(IngredientTable::Id, Order::Asc)
        .build_sqlx(SqliteQueryBuilder);

    let rows = sqlx::query_as_with::<_, (String, String), _>(&sql, values)
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter(|(id, _)| Some(id.as_str()) != exclude_id)
        .find(|(_, n)| normalize_name(n) == wanted)
        .map(|(id, _)| id))
}
