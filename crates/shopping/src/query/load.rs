use mealbook_db::table::ShoppingListItem;
use mealbook_mealplan::Plan;
use mealbook_shared::{
    mealplan::PlanKind,
    recipe::{IngredientCategory, Unit},
};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShoppingLine {
    pub ingredient_id: String,
    pub name: String,
    pub unit: Unit,
    pub category: IngredientCategory,
    /// Quantity computed from the planned meals.
    pub required: f64,
    /// Manual override when set, `required` otherwise.
    pub quantity: f64,
    pub overridden: bool,
    pub checked: bool,
    pub formatted: String,
    pub recipes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShoppingList {
    pub plan: Plan,
    pub lines: Vec<ShoppingLine>,
}

impl ShoppingList {
    pub fn remaining(&self) -> usize {
        self.lines.iter().filter(|l| !l.checked).count()
    }
}

#[derive(FromRow)]
struct ItemRow {
    ingredient_id: String,
    checked: bool,
    quantity: Option<f64>,
}

impl super::Query {
    /// Current content of a shopping list. With `checked_last`, checked lines
    /// move after the unchecked ones and keep their relative order.
    pub async fn load(
        &self,
        list_id: impl Into<String>,
        checked_last: bool,
    ) -> mealbook_shared::Result<Option<ShoppingList>> {
        let list_id = list_id.into();
        let mut conn = self.read_db.acquire().await?;
        let Some(plan) = mealbook_mealplan::load_plan(&mut conn, &list_id).await? else {
            return Ok(None);
        };

        if plan.kind != PlanKind::ShoppingList {
            return Ok(None);
        }

        let (sql, values) = sea_query::Query::select()
            .columns([
                ShoppingListItem::IngredientId,
                ShoppingListItem::Checked,
                ShoppingListItem::Quantity,
            ])
            .from(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::PlanId).eq(&list_id))
            .build_sqlx(SqliteQueryBuilder);

        let items = sqlx::query_as_with::<_, ItemRow, _>(&sql, values)
            .fetch_all(&mut *conn)
            .await?
            .into_iter()
            .map(|item| (item.ingredient_id.to_owned(), item))
            .collect::<HashMap<_, _>>();

        drop(conn);

        let requirements = crate::requirements(&self.0, &plan).await?;
        let mut lines = crate::aggregate(requirements)
            .into_iter()
            .map(|aggregated| {
                let item = items.get(&aggregated.ingredient.id);
                let overridden = item.and_then(|i| i.quantity);
                let quantity = overridden.unwrap_or(aggregated.quantity);

                ShoppingLine {
                    formatted: aggregated.ingredient.unit.format(quantity),
                    ingredient_id: aggregated.ingredient.id,
                    name: aggregated.ingredient.name,
                    unit: aggregated.ingredient.unit,
                    category: aggregated.ingredient.category,
                    required: aggregated.quantity,
                    quantity,
                    overridden: overridden.is_some(),
                    checked: item.is_some_and(|i| i.checked),
                    recipes: aggregated.recipes,
                }
            })
            .collect::<Vec<_>>();

        if checked_last {
            lines.sort_by_key(|l| l.checked);
        }

        Ok(Some(ShoppingList { plan, lines }))
    }

    /// Shopping lists, most recent range first.
    pub async fn lists(&self) -> mealbook_shared::Result<Vec<Plan>> {
        let mut lists = mealbook_mealplan::Query(self.0.clone())
            .list(Some(PlanKind::ShoppingList))
            .await?;
        lists.reverse();

        Ok(lists)
    }
}
