use mealbook_db::table::{Plan, PlannedMeal};
use mealbook_shared::{clean_name, mealplan::PlanKind, to_day};
use sea_query::{Cond, Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::Date;
use validator::Validate;

#[derive(Validate)]
struct PlanName {
    #[validate(length(min = 1, max = 80))]
    name: String,
}

impl super::Command {
    /// Renames a planner or a shopping list.
    pub async fn rename(
        &self,
        id: impl Into<String>,
        name: impl AsRef<str>,
    ) -> mealbook_shared::Result<()> {
        let id = id.into();
        let input = PlanName {
            name: clean_name(name.as_ref()),
        };
        input.validate()?;

        let (sql, values) = Query::update()
            .table(Plan::Table)
            .value(Plan::Name, input.name)
            .and_where(Expr::col(Plan::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            mealbook_shared::not_found!("plan {id}");
        }

        Ok(())
    }

    /// Changes the date range, refused while meals sit outside the new one.
    pub async fn reschedule(
        &self,
        id: impl Into<String>,
        start: Date,
        end: Date,
    ) -> mealbook_shared::Result<()> {
        let id = id.into();
        super::check_range(start, end)?;

        let mut tx = self.write_db.begin().await?;
        crate::load_plan_of_kind(&mut tx, &id, PlanKind::Planner).await?;

        let (sql, values) = Query::select()
            .column(PlannedMeal::Id)
            .from(PlannedMeal::Table)
            .and_where(Expr::col(PlannedMeal::PlanId).eq(&id))
            .cond_where(
                Cond::any()
                    .add(Expr::col(PlannedMeal::Day).lt(to_day(start)))
                    .add(Expr::col(PlannedMeal::Day).gt(to_day(end))),
            )
            .build_sqlx(SqliteQueryBuilder);

        let outside = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&mut *tx)
            .await?;

        if !outside.is_empty() {
            mealbook_shared::user!(
                "{} planned meal(s) fall outside the new date range",
                outside.len()
            );
        }

        let (sql, values) = Query::update()
            .table(Plan::Table)
            .values([
                (Plan::StartDay, to_day(start).into()),
                (Plan::EndDay, to_day(end).into()),
            ])
            .and_where(Expr::col(Plan::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(())
    }
}
