use mealbook_db::table::{Folder, Recipe};
use mealbook_shared::normalize_name;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use std::collections::HashSet;
use strum::{Display, EnumString};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Children and recipes move up to the deleted folder's parent.
    #[default]
    Lift,
    /// The whole subtree goes, recipes included.
    Cascade,
}

impl super::Command {
    pub async fn delete(
        &self,
        id: impl Into<String>,
        mode: DeleteMode,
    ) -> mealbook_shared::Result<()> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;
        let hierarchy = super::load_hierarchy(&mut tx).await?;

        let Some(folder) = hierarchy.get(&id) else {
            mealbook_shared::not_found!("folder {id}");
        };

        match mode {
            DeleteMode::Lift => {
                let parent_id = folder.parent_id.to_owned();
                let taken = hierarchy
                    .children(parent_id.as_deref())
                    .iter()
                    .filter(|f| f.id != id)
                    .map(|f| normalize_name(&f.name))
                    .collect::<HashSet<_>>();

                if let Some(conflict) = hierarchy
                    .children(Some(&id))
                    .iter()
                    .find(|f| taken.contains(&normalize_name(&f.name)))
                {
                    mealbook_shared::user!(
                        "folder '{}' already exists in the parent folder",
                        conflict.name
                    );
                }

                let (sql, values) = Query::update()
                    .table(Folder::Table)
                    .value(Folder::ParentId, parent_id.to_owned())
                    .and_where(Expr::col(Folder::ParentId).eq(&id))
                    .build_sqlx(SqliteQueryBuilder);
                sqlx::query_with(&sql, values).execute(&mut *tx).await?;

                let (sql, values) = Query::update()
                    .table(Recipe::Table)
                    .value(Recipe::FolderId, parent_id.to_owned())
                    .and_where(Expr::col(Recipe::FolderId).eq(&id))
                    .build_sqlx(SqliteQueryBuilder);
                sqlx::query_with(&sql, values).execute(&mut *tx).await?;

                let (sql, values) = Query::delete()
                    .from_table(Folder::Table)
                    .and_where(Expr::col(Folder::Id).eq(&id))
                    .build_sqlx(SqliteQueryBuilder);
                sqlx::query_with(&sql, values).execute(&mut *tx).await?;

                tx.commit().await?;

                tracing::info!(folder.id = %id, "folder deleted, content lifted");
            }
            DeleteMode::Cascade => {
                let mut ids = hierarchy.descendant_ids(&id);
                ids.push(id.to_owned());

                let (sql, values) = Query::select()
                    .column(Recipe::Id)
                    .from(Recipe::Table)
                    .and_where(Expr::col(Recipe::FolderId).is_in(ids.clone()))
                    .build_sqlx(SqliteQueryBuilder);
                let recipes = sqlx::query_as_with::<_, (String,), _>(&sql, values)
                    .fetch_all(&mut *tx)
                    .await?;

                for (recipe_id,) in recipes.iter() {
                    crate::root::delete_recipe(&mut tx, recipe_id).await?;
                }

                let (sql, values) = Query::delete()
                    .from_table(Folder::Table)
                    .and_where(Expr::col(Folder::Id).is_in(ids.clone()))
                    .build_sqlx(SqliteQueryBuilder);
                sqlx::query_with(&sql, values).execute(&mut *tx).await?;

                tx.commit().await?;

                tracing::info!(
                    folder.id = %id,
                    folders = ids.len(),
                    recipes = recipes.len(),
                    "folder subtree deleted"
                );
            }
        }

        Ok(())
    }
}
