use mealbook_db::table::{Plan, ShoppingListItem};
use mealbook_shared::mealplan::PlanKind;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    pub async fn delete(&self, list_id: impl Into<String>) -> mealbook_shared::Result<()> {
        let list_id = list_id.into();
        let mut tx = self.write_db.begin().await?;
        mealbook_mealplan::load_plan_of_kind(&mut tx, &list_id, PlanKind::ShoppingList).await?;

        let (sql, values) = Query::delete()
            .from_table(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::PlanId).eq(&list_id))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let (sql, values) = Query::delete()
            .from_table(Plan::Table)
            .and_where(Expr::col(Plan::Id).eq(&list_id))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(plan.id = %list_id, "shopping list deleted");

        Ok(())
    }
}
