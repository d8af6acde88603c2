use mealbook_db::table::Recipe;
use mealbook_shared::clean_name;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use ulid::Ulid;
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct IngredientLine {
    pub ingredient_id: String,
    /// In the ingredient's base unit.
    pub quantity: f64,
    #[serde(default)]
    pub note: Option<String>,
}

impl IngredientLine {
    pub fn new(ingredient_id: impl Into<String>, quantity: f64) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            quantity,
            note: None,
        }
    }
}

fn default_servings() -> u32 {
    1
}

#[derive(Validate, Clone, Debug, Deserialize)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,
    #[serde(default = "default_servings")]
    #[validate(range(min = 1, max = 100))]
    pub servings: u32,
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub instructions: String,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
}

impl Default for CreateInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            servings: default_servings(),
            instructions: String::new(),
            folder_id: None,
            source_url: None,
            ingredients: vec![],
        }
    }
}

impl super::Command {
    pub async fn create(&self, input: CreateInput) -> mealbook_shared::Result<String> {
        let input = CreateInput {
            name: clean_name(&input.name),
            description: input.description.trim().to_owned(),
            instructions: input.instructions.trim().to_owned(),
            ..input
        };
        input.validate()?;

        let mut tx = self.write_db.begin().await?;

        if let Some(folder_id) = input.folder_id.as_deref() {
            if !crate::folder::folder_exists(&mut tx, folder_id).await? {
                mealbook_shared::not_found!("folder {folder_id}");
            }
        }

        super::check_lines(&mut tx, &input.ingredients).await?;

        let id = Ulid::new().to_string();
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
                id.to_owned().into(),
                input.folder_id.into(),
                input.name.to_owned().into(),
                input.description.into(),
                input.servings.into(),
                input.instructions.into(),
                input.source_url.into(),
                mealbook_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        super::write_lines(&mut tx, &id, &input.ingredients).await?;
        super::refresh_totals(&mut tx, &id).await?;

        tx.commit().await?;

        tracing::info!(recipe.id = %id, name = %input.name, "recipe created");

        Ok(id)
    }
}
