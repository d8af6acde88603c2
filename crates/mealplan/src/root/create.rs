use mealbook_db::table::Plan;
use mealbook_shared::{clean_name, mealplan::PlanKind, to_day};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use time::Date;
use ulid::Ulid;
use validator::Validate;

#[derive(Validate, Clone, Debug, Deserialize)]
pub struct CreatePlanInput {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    pub start: Date,
    pub end: Date,
}

impl super::Command {
    pub async fn create(&self, input: CreatePlanInput) -> mealbook_shared::Result<String> {
        let input = CreatePlanInput {
            name: clean_name(&input.name),
            ..input
        };
        input.validate()?;
        super::check_range(input.start, input.end)?;

        let id = Ulid::new().to_string();
        let (sql, values) = Query::insert()
            .into_table(Plan::Table)
            .columns([
                Plan::Id,
                Plan::Kind,
                Plan::Name,
                Plan::StartDay,
                Plan::EndDay,
                Plan::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                PlanKind::Planner.to_string().into(),
                input.name.to_owned().into(),
                to_day(input.start).into(),
                to_day(input.end).into(),
                mealbook_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(plan.id = %id, name = %input.name, "meal planner created");

        Ok(id)
    }
}
