use mealbook_db::table::ShoppingListItem;
use mealbook_mealplan::Plan;
use mealbook_shared::mealplan::PlanKind;
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use std::collections::HashSet;

impl super::Command {
    async fn load_list(&self, list_id: &str) -> mealbook_shared::Result<Plan> {
        let mut conn = self.read_db.acquire().await?;

        mealbook_mealplan::load_plan_of_kind(&mut conn, list_id, PlanKind::ShoppingList).await
    }

    async fn required_ids(&self, list: &Plan) -> mealbook_shared::Result<HashSet<String>> {
        Ok(crate::requirements(&self.state, list)
            .await?
            .into_iter()
            .map(|r| r.ingredient.id)
            .collect())
    }

    async fn check_required(&self, list: &Plan, ingredient_id: &str) -> mealbook_shared::Result<()> {
        if !self.required_ids(list).await?.contains(ingredient_id) {
            mealbook_shared::user!(
                "ingredient {ingredient_id} is not on the list '{}'",
                list.name
            );
        }

        Ok(())
    }

    /// Flips the checkbox of a line and returns the new state.
    pub async fn toggle(
        &self,
        list_id: impl Into<String>,
        ingredient_id: impl Into<String>,
    ) -> mealbook_shared::Result<bool> {
        let list_id = list_id.into();
        let ingredient_id = ingredient_id.into();
        let list = self.load_list(&list_id).await?;
        self.check_required(&list, &ingredient_id).await?;

        let mut tx = self.write_db.begin().await?;

        let (sql, values) = Query::select()
            .column(ShoppingListItem::Checked)
            .from(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::PlanId).eq(&list_id))
            .and_where(Expr::col(ShoppingListItem::IngredientId).eq(&ingredient_id))
            .build_sqlx(SqliteQueryBuilder);
        let checked = sqlx::query_as_with::<_, (bool,), _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
            .map(|(checked,)| !checked)
            .unwrap_or(true);

        let (sql, values) = Query::insert()
            .into_table(ShoppingListItem::Table)
            .columns([
                ShoppingListItem::PlanId,
                ShoppingListItem::IngredientId,
                ShoppingListItem::Checked,
            ])
            .values_panic([
                list_id.to_owned().into(),
                ingredient_id.to_owned().into(),
                checked.into(),
            ])
            .on_conflict(
                OnConflict::columns([ShoppingListItem::PlanId, ShoppingListItem::IngredientId])
                    .update_column(ShoppingListItem::Checked)
                    .to_owned(),
            )
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(checked)
    }

    /// Stores a manual quantity for a line, `None` goes back to the computed one.
    pub async fn set_quantity(
        &self,
        list_id: impl Into<String>,
        ingredient_id: impl Into<String>,
        quantity: Option<f64>,
    ) -> mealbook_shared::Result<()> {
        let list_id = list_id.into();
        let ingredient_id = ingredient_id.into();

        if let Some(quantity) = quantity {
            if !quantity.is_finite() || quantity < 0.0 {
                mealbook_shared::user!("quantity must be a positive number or zero");
            }
        }

        let list = self.load_list(&list_id).await?;
        self.check_required(&list, &ingredient_id).await?;

        let (sql, values) = Query::insert()
            .into_table(ShoppingListItem::Table)
            .columns([
                ShoppingListItem::PlanId,
                ShoppingListItem::IngredientId,
                ShoppingListItem::Quantity,
            ])
            .values_panic([
                list_id.to_owned().into(),
                ingredient_id.to_owned().into(),
                quantity.into(),
            ])
            .on_conflict(
                OnConflict::columns([ShoppingListItem::PlanId, ShoppingListItem::IngredientId])
                    .update_column(ShoppingListItem::Quantity)
                    .to_owned(),
            )
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }

    /// Unchecks every line, manual quantities are kept.
    pub async fn reset(&self, list_id: impl Into<String>) -> mealbook_shared::Result<()> {
        let list_id = list_id.into();
        self.load_list(&list_id).await?;

        let (sql, values) = Query::update()
            .table(ShoppingListItem::Table)
            .value(ShoppingListItem::Checked, false)
            .and_where(Expr::col(ShoppingListItem::PlanId).eq(&list_id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }

    /// Forgets the state of ingredients no longer needed by the list.
    pub async fn prune(&self, list_id: impl Into<String>) -> mealbook_shared::Result<usize> {
        let list_id = list_id.into();
        let list = self.load_list(&list_id).await?;
        let required = self.required_ids(&list).await?;

        let mut statement = Query::delete()
            .from_table(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::PlanId).eq(&list_id))
            .to_owned();

        if !required.is_empty() {
            statement.and_where(
                Expr::col(ShoppingListItem::IngredientId).is_not_in(required),
            );
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let pruned = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .rows_affected() as usize;

        if pruned > 0 {
            tracing::info!(plan.id = %list_id, pruned, "stale shopping items removed");
        }

        Ok(pruned)
    }
}
