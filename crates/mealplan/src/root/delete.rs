use mealbook_db::table::{Plan, PlannedMeal};
use mealbook_shared::mealplan::PlanKind;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Deletes a planner and its meals. Shopping lists generated from it are
    /// kept and detached.
    pub async fn delete(&self, id: impl Into<String>) -> mealbook_shared::Result<()> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;
        crate::load_plan_of_kind(&mut tx, &id, PlanKind::Planner).await?;

        let (sql, values) = Query::delete()
            .from_table(PlannedMeal::Table)
            .and_where(Expr::col(PlannedMeal::PlanId).eq(&id))
            .build_sqlx(SqliteQueryBuilder);
        let meals = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let (sql, values) = Query::update()
            .table(Plan::Table)
            .value(Plan::SourcePlanId, Option::<String>::None)
            .and_where(Expr::col(Plan::SourcePlanId).eq(&id))
            .build_sqlx(SqliteQueryBuilder);
        let detached = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let (sql, values) = Query::delete()
            .from_table(Plan::Table)
            .and_where(Expr::col(Plan::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(plan.id = %id, meals, detached, "meal planner deleted");

        Ok(())
    }
}
