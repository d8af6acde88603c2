use mealbook_db::table::Plan as PlanTable;
use mealbook_shared::mealplan::PlanKind;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::{PLAN_COLUMNS, Plan, PlanRow};

impl super::Query {
    pub async fn find(&self, id: impl Into<String>) -> mealbook_shared::Result<Option<Plan>> {
        let id = id.into();
        let mut conn = self.read_db.acquire().await?;

        crate::load_plan(&mut conn, &id).await
    }

    /// Plans ordered by start date, optionally of one kind only.
    pub async fn list(&self, kind: Option<PlanKind>) -> mealbook_shared::Result<Vec<Plan>> {
        let mut statement = sea_query::Query::select()
            .columns(PLAN_COLUMNS)
            .from(PlanTable::Table)
            .order_by(PlanTable::StartDay, Order::Asc)
            .order_by(PlanTable::Name, Order::Asc)
            .to_owned();

        if let Some(kind) = kind {
            statement.and_where(Expr::col(PlanTable::Kind).eq(kind.to_string()));
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter().map(Plan::try_from).collect()
    }
}
