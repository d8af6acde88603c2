use mealbook_db::table::Folder;
use mealbook_shared::clean_name;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use ulid::Ulid;
use validator::Validate;

#[derive(Validate, Clone, Debug, Default, Deserialize)]
pub struct CreateFolderInput {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl super::Command {
    pub async fn create(&self, input: CreateFolderInput) -> mealbook_shared::Result<String> {
        let input = CreateFolderInput {
            name: clean_name(&input.name),
            ..input
        };
        input.validate()?;

        let mut tx = self.write_db.begin().await?;

        if let Some(parent_id) = input.parent_id.as_deref() {
            if !super::folder_exists(&mut tx, parent_id).await? {
                mealbook_shared::not_found!("folder {parent_id}");
            }
        }

        if super::find_sibling(&mut tx, input.parent_id.as_deref(), &input.name, None)
            .await?
            .is_some()
        {
            mealbook_shared::user!("folder '{}' already exists here", input.name);
        }

        let id = Ulid::new().to_string();
        let (sql, values) = Query::insert()
            .into_table(Folder::Table)
            .columns([
                Folder::Id,
                Folder::ParentId,
                Folder::Name,
                Folder::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.parent_id.to_owned().into(),
                input.name.to_owned().into(),
                mealbook_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(folder.id = %id, name = %input.name, "folder created");

        Ok(id)
    }
}
