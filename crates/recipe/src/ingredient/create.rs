use mealbook_db::table::Ingredient;
use mealbook_shared::{
    clean_name,
    recipe::{IngredientCategory, Nutrition, Unit},
};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use ulid::Ulid;
use validator::Validate;

#[derive(Validate, Clone, Debug, Default, Deserialize)]
pub struct CreateIngredientInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub category: IngredientCategory,
    #[serde(default)]
    pub nutrition: Nutrition,
}

impl super::Command {
    pub async fn create(&self, input: CreateIngredientInput) -> mealbook_shared::Result<String> {
        let input = CreateIngredientInput {
            name: clean_name(&input.name),
            ..input
        };
        input.validate()?;

        if !input.nutrition.is_valid() {
            mealbook_shared::user!("nutrition values must be positive numbers");
        }

        let mut conn = self.write_db.acquire().await?;
        if super::find_id_by_name(&mut conn, &input.name, None)
            .await?
            .is_some()
        {
            mealbook_shared::user!("ingredient '{}' already exists", input.name);
        }

        let id = Ulid::new().to_string();
        let (sql, values) = Query::insert()
            .into_table(Ingredient::Table)
            .columns([
                Ingredient::Id,
                Ingredient::Name,
                Ingredient::Unit,
                Ingredient::Category,
                Ingredient::Calories,
                Ingredient::Protein,
                Ingredient::Carbohydrates,
                Ingredient::Fat,
                Ingredient::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.name.to_owned().into(),
                input.unit.to_string().into(),
                input.category.to_string().into(),
                input.nutrition.calories.into(),
                input.nutrition.protein.into(),
                input.nutrition.carbohydrates.into(),
                input.nutrition.fat.into(),
                mealbook_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *conn).await?;

        tracing::info!(ingredient.id = %id, name = %input.name, "ingredient created");

        Ok(id)
    }
}
