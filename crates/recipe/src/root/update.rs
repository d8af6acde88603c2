use mealbook_db::table::Recipe;
use mealbook_shared::clean_name;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

#[derive(Validate, Clone, Debug, Deserialize)]
pub struct UpdateInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,
    #[validate(range(min = 1, max = 100))]
    pub servings: u32,
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub instructions: String,
}

impl super::Command {
    /// Basic information only, lines and folder have their own operations.
    pub async fn update(
        &self,
        id: impl Into<String>,
        input: UpdateInput,
    ) -> mealbook_shared::Result<()> {
        let id = id.into();
        let input = UpdateInput {
            name: clean_name(&input.name),
            description: input.description.trim().to_owned(),
            instructions: input.instructions.trim().to_owned(),
            ..input
        };
        input.validate()?;

        let (sql, values) = Query::update()
            .table(Recipe::Table)
            .values([
                (Recipe::Name, input.name.into()),
                (Recipe::Description, input.description.into()),
                (Recipe::Servings, input.servings.into()),
                (Recipe::Instructions, input.instructions.into()),
                (Recipe::UpdatedAt, mealbook_shared::now().into()),
            ])
            .and_where(Expr::col(Recipe::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            mealbook_shared::not_found!("recipe {id}");
        }

        Ok(())
    }

    pub async fn move_to_folder(
        &self,
        id: impl Into<String>,
        folder_id: Option<String>,
    ) -> mealbook_shared::Result<()> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;

        if !super::recipe_exists(&mut tx, &id).await? {
            mealbook_shared::not_found!("recipe {id}");
        }

        if let Some(folder_id) = folder_id.as_deref() {
            if !crate::folder::folder_exists(&mut tx, folder_id).await? {
                mealbook_shared::not_found!("folder {folder_id}");
            }
        }

        let (sql, values) = Query::update()
            .table(Recipe::Table)
            .values([
                (Recipe::FolderId, folder_id.into()),
                (Recipe::UpdatedAt, mealbook_shared::now().into()),
            ])
            .and_where(Expr::col(Recipe::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(())
    }
}
