use mealbook_db::table::{Ingredient, RecipeIngredient, ShoppingListItem};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Refuses to delete an ingredient that still appears in a recipe.
    pub async fn delete(&self, id: impl Into<String>) -> mealbook_shared::Result<()> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;

        let Some(ingredient) = super::load_many(&mut tx, vec![id.to_owned()])
            .await?
            .into_iter()
            .next()
        else {
            mealbook_shared::not_found!("ingredient {id}");
        };

        let (sql, values) = Query::select()
            .column(RecipeIngredient::RecipeId)
            .distinct()
            .from(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::IngredientId).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        let used_by = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&mut *tx)
            .await?;

        if !used_by.is_empty() {
            mealbook_shared::user!(
                "ingredient '{}' is used by {} recipe(s)",
                ingredient.name,
                used_by.len()
            );
        }

        let (sql, values) = Query::delete()
            .from_table(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::IngredientId).eq(&id))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let (sql, values) = Query::delete()
            .from_table(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(ingredient.id = %id, "ingredient deleted");

        Ok(())
    }
}
