use mealbook_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;
use ulid::Ulid;

#[derive(FromRow)]
struct SourceRow {
    folder_id: Option<String>,
    name: String,
    description: String,
    servings: u32,
    instructions: String,
    source_url: Option<String>,
}

impl super::Command {
    /// Copies the recipe and its lines into the same folder as "<name> (copy)".
    pub async fn duplicate(&self, id: impl Into<String>) -> mealbook_shared::Result<String> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;

        let (sql, values) = Query::select()
            .columns([
                Recipe::FolderId,
                Recipe::Name,
                Recipe::Description,
                Recipe::Servings,
                Recipe::Instructions,
                Recipe::SourceUrl,
            ])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        let Some(source) = sqlx::query_as_with::<_, SourceRow, _>(&sql, values)
            .fetch_optional(&mut *tx)
            .await?
        else {
            mealbook_shared::not_found!("recipe {id}");
        };

        let lines = super::load_lines(&mut tx, &id)
            .await?
            .into_iter()
            .map(|row| super::IngredientLine {
                ingredient_id: row.ingredient_id,
                quantity: row.quantity,
                note: row.note,
            })
            .collect::<Vec<_>>();

        let name = format!(
            "{} (copy)",
            source.name.chars().take(113).collect::<String>()
        );

        let copy_id = Ulid::new().to_string();
        let (sql, values) = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::Id,
                Recipe::FolderId,
                Recipe::Name,
                Recipe::Description,
                Recipe::Servings,
                Recipe::Instructions,
                Recipe::SourceUrl,
                Recipe::CreatedAt,
            ])
            .values_panic([
                copy_id.to_owned().into(),
                source.folder_id.into(),
                name.into(),
                source.description.into(),
                source.servings.into(),
                source.instructions.into(),
                source.source_url.into(),
                mealbook_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        super::write_lines(&mut tx, &copy_id, &lines).await?;
        super::refresh_totals(&mut tx, &copy_id).await?;

        tx.commit().await?;

        tracing::info!(recipe.id = %copy_id, source.id = %id, "recipe duplicated");

        Ok(copy_id)
    }
}
