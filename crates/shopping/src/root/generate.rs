use mealbook_db::table::Plan;
use mealbook_shared::{clean_name, format_date, mealplan::PlanKind, to_day};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use time::Date;
use ulid::Ulid;
use validator::Validate;

#[derive(Validate, Clone, Debug, Default, Deserialize)]
pub struct GenerateInput {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[serde(default)]
    pub source_plan_id: Option<String>,
    #[serde(default)]
    pub start: Option<Date>,
    #[serde(default)]
    pub end: Option<Date>,
}

impl super::Command {
    /// Creates a shopping list over a planner, or over every planner between
    /// two dates when no source is given.
    pub async fn generate(&self, input: GenerateInput) -> mealbook_shared::Result<String> {
        let input = GenerateInput {
            name: clean_name(&input.name),
            ..input
        };
        input.validate()?;

        let (start, end) = match input.source_plan_id.as_deref() {
            Some(source_id) => {
                let mut conn = self.read_db.acquire().await?;
                let source =
                    mealbook_mealplan::load_plan_of_kind(&mut conn, source_id, PlanKind::Planner)
                        .await?;

                let start = input.start.unwrap_or(source.start);
                let end = input.end.unwrap_or(source.end);

                if !source.contains(start) || !source.contains(end) {
                    mealbook_shared::user!(
                        "the list must lie within '{}' ({} to {})",
                        source.name,
                        format_date(source.start),
                        format_date(source.end)
                    );
                }

                (start, end)
            }
            None => {
                let (Some(start), Some(end)) = (input.start, input.end) else {
                    mealbook_shared::user!("a list without a planner needs a start and an end date");
                };

                (start, end)
            }
        };

        mealbook_mealplan::check_range(start, end)?;

        let id = Ulid::new().to_string();
        let (sql, values) = Query::insert()
            .into_table(Plan::Table)
            .columns([
                Plan::Id,
                Plan::Kind,
                Plan::Name,
                Plan::StartDay,
                Plan::EndDay,
                Plan::SourcePlanId,
                Plan::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                PlanKind::ShoppingList.to_string().into(),
                input.name.to_owned().into(),
                to_day(start).into(),
                to_day(end).into(),
                input.source_plan_id.to_owned().into(),
                mealbook_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(
            plan.id = %id,
            source = ?input.source_plan_id,
            start = %format_date(start),
            end = %format_date(end),
            "shopping list generated"
        );

        Ok(id)
    }
}
