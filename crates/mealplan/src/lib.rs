mod query;
mod root;

pub use query::*;
pub use root::*;

use mealbook_db::table::Plan as PlanTable;
use mealbook_shared::{from_day, mealplan::PlanKind};
use sea_query::{Expr, ExprTrait, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteConnection, prelude::FromRow};
use time::Date;

/// A meal planner or a shopping list, both cover an inclusive date range.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Plan {
    pub id: String,
    pub kind: PlanKind,
    pub name: String,
    pub start: Date,
    pub end: Date,
    pub source_plan_id: Option<String>,
    pub created_at: i64,
}

impl Plan {
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date of the range, in order.
    pub fn dates(&self) -> Vec<Date> {
        let mut dates = vec![];
        let mut current = Some(self.start);

        while let Some(date) = current.filter(|d| *d <= self.end) {
            dates.push(date);
            current = date.next_day();
        }

        dates
    }
}

#[derive(FromRow)]
pub(crate) struct PlanRow {
    pub id: String,
    pub kind: sqlx::types::Text<PlanKind>,
    pub name: String,
    pub start_day: i32,
    pub end_day: i32,
    pub source_plan_id: Option<String>,
    pub created_at: i64,
}

impl TryFrom<PlanRow> for Plan {
    type Error = mealbook_shared::Error;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            kind: row.kind.0,
            name: row.name,
            start: from_day(row.start_day)?,
            end: from_day(row.end_day)?,
            source_plan_id: row.source_plan_id,
            created_at: row.created_at,
        })
    }
}

pub(crate) const PLAN_COLUMNS: [PlanTable; 7] = [
    PlanTable::Id,
    PlanTable::Kind,
    PlanTable::Name,
    PlanTable::StartDay,
    PlanTable::EndDay,
    PlanTable::SourcePlanId,
    PlanTable::CreatedAt,
];

/// Loads a plan of any kind.
pub async fn load_plan(
    conn: &mut SqliteConnection,
    id: &str,
) -> mealbook_shared::Result<Option<Plan>> {
    let (sql, values) = SeaQuery::select()
        .columns(PLAN_COLUMNS)
        .from(PlanTable::Table)
        .and_where(Expr::col(PlanTable::Id).eq(id))
        .build_sqlx(SqliteQueryBuilder);

    let row = sqlx::query_as_with::<_, PlanRow, _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?;

    row.map(Plan::try_from).transpose()
}

/// Loads a plan and checks its kind.
pub async fn load_plan_of_kind(
    conn: &mut SqliteConnection,
    id: &str,
    kind: PlanKind,
) -> mealbook_shared::Result<Plan> {
    let Some(plan) = load_plan(conn, id).await? else {
        mealbook_shared::not_found!("plan {id}");
    };

    if plan.kind != kind {
        mealbook_shared::user!("plan '{}' is not a {}", plan.name, kind_label(kind));
    }

    Ok(plan)
}

fn kind_label(kind: PlanKind) -> &'static str {
    match kind {
        PlanKind::Planner => "meal planner",
        PlanKind::ShoppingList => "shopping list",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn plan(start: Date, end: Date) -> Plan {
        Plan {
            id: "p".to_owned(),
            kind: PlanKind::Planner,
            name: "Week".to_owned(),
            start,
            end,
            source_plan_id: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_dates_cover_range() {
        let plan = plan(date!(2024 - 02 - 27), date!(2024 - 03 - 01));

        assert_eq!(
            plan.dates(),
            vec![
                date!(2024 - 02 - 27),
                date!(2024 - 02 - 28),
                date!(2024 - 02 - 29),
                date!(2024 - 03 - 01)
            ]
        );
    }

    #[test]
    fn test_contains_is_inclusive() {
        let plan = plan(date!(2025 - 01 - 01), date!(2025 - 01 - 07));

        assert!(plan.contains(date!(2025 - 01 - 01)));
        assert!(plan.contains(date!(2025 - 01 - 07)));
        assert!(!plan.contains(date!(2025 - 01 - 08)));
    }
}
