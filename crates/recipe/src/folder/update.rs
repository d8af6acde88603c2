use mealbook_db::table::Folder;
use mealbook_shared::clean_name;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

#[derive(Validate)]
struct FolderName {
    #[validate(length(min = 1, max = 80))]
    name: String,
}

impl super::Command {
    pub async fn rename(
        &self,
        id: impl Into<String>,
        name: impl AsRef<str>,
    ) -> mealbook_shared::Result<()> {
        let id = id.into();
        let input = FolderName {
            name: clean_name(name.as_ref()),
        };
        input.validate()?;

        let mut tx = self.write_db.begin().await?;
        let hierarchy = super::load_hierarchy(&mut tx).await?;
        let Some(folder) = hierarchy.get(&id) else {
            mealbook_shared::not_found!("folder {id}");
        };

        if super::find_sibling(&mut tx, folder.parent_id.as_deref(), &input.name, Some(&id))
            .await?
            .is_some()
        {
            mealbook_shared::user!("folder '{}' already exists here", input.name);
        }

        let (sql, values) = Query::update()
            .table(Folder::Table)
            .value(Folder::Name, input.name.to_owned())
            .and_where(Expr::col(Folder::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(())
    }

    /// Moves a folder under `parent_id`, or to the root when `None`.
    pub async fn move_to(
        &self,
        id: impl Into<String>,
        parent_id: Option<String>,
    ) -> mealbook_shared::Result<()> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;
        let hierarchy = super::load_hierarchy(&mut tx).await?;

        let Some(folder) = hierarchy.get(&id) else {
            mealbook_shared::not_found!("folder {id}");
        };

        if let Some(parent_id) = parent_id.as_deref() {
            if !hierarchy.contains(parent_id) {
                mealbook_shared::not_found!("folder {parent_id}");
            }

            if hierarchy.is_within(parent_id, &id) {
                mealbook_shared::user!("a folder cannot be moved into itself or one of its subfolders");
            }
        }

        if super::find_sibling(&mut tx, parent_id.as_deref(), &folder.name, Some(&id))
            .await?
            .is_some()
        {
            mealbook_shared::user!("folder '{}' already exists here", folder.name);
        }

        let (sql, values) = Query::update()
            .table(Folder::Table)
            .value(Folder::ParentId, parent_id.to_owned())
            .and_where(Expr::col(Folder::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(folder.id = %id, parent_id = ?parent_id, "folder moved");

        Ok(())
    }
}
