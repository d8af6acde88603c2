mod folder;
mod ingredient;
mod plan;
mod planned_meal;
mod recipe;
mod recipe_ingredient;
mod shopping_list_item;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "mealbook",
    "m0001",
    vec_box![],
    vec_box![
        folder::CreateTable,
        folder::CreateParentIdx,
        ingredient::CreateTable,
        ingredient::CreateNameIdx,
        recipe::CreateTable,
        recipe::CreateFolderIdx,
        recipe_ingredient::CreateTable,
        recipe_ingredient::CreateIngredientIdx,
        plan::CreateTable,
        planned_meal::CreateTable,
        planned_meal::CreatePlanDayIdx,
        shopping_list_item::CreateTable
    ]
);

/// Runs a table or index statement pair as a migration operation.
macro_rules! operation {
    ($name:ident, $up:expr, $down:expr) => {
        #[async_trait::async_trait]
        impl sqlx_migrator::Operation<sqlx::Sqlite> for $name {
            async fn up(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement = $up.to_string(sea_query::SqliteQueryBuilder);
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }

            async fn down(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement = $down.to_string(sea_query::SqliteQueryBuilder);
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }
        }
    };
}

pub(crate) use operation;
