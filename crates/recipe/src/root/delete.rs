use mealbook_db::table::{PlannedMeal, Recipe, RecipeIngredient};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqliteConnection;

impl super::Command {
    /// Deletes the recipe, its lines and every meal planned with it.
    pub async fn delete(&self, id: impl Into<String>) -> mealbook_shared::Result<()> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;

        if !super::recipe_exists(&mut tx, &id).await? {
            mealbook_shared::not_found!("recipe {id}");
        }

        let meals = delete_recipe(&mut tx, &id).await?;
        tx.commit().await?;

        tracing::info!(recipe.id = %id, planned_meals = meals, "recipe deleted");

        Ok(())
    }
}

/// Returns the number of planned meals removed with the recipe.
pub(crate) async fn delete_recipe(
    conn: &mut SqliteConnection,
    recipe_id: &str,
) -> anyhow::Result<u64> {
    let (sql, values) = Query::delete()
        .from_table(PlannedMeal::Table)
        .and_where(Expr::col(PlannedMeal::RecipeId).eq(recipe_id))
        .build_sqlx(SqliteQueryBuilder);
    let meals = sqlx::query_with(&sql, values)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    let (sql, values) = Query::delete()
        .from_table(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let (sql, values) = Query::delete()
        .from_table(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(recipe_id))
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(meals)
}
