use mealbook_db::table::Ingredient;
use mealbook_shared::{
    clean_name,
    recipe::{IngredientCategory, Nutrition, Unit},
};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

#[derive(Validate, Clone, Debug, Default, Deserialize)]
pub struct UpdateIngredientInput {
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
    /// Updates the catalog entry and recomputes the totals of every recipe using it.
    pub async fn update(
        &self,
        id: impl Into<String>,
        input: UpdateIngredientInput,
    ) -> mealbook_shared::Result<()> {
        let id = id.into();
        let input = UpdateIngredientInput {
            name: clean_name(&input.name),
            ..input
        };
        input.validate()?;

        if !input.nutrition.is_valid() {
            mealbook_shared::user!("nutrition values must be positive numbers");
        }

        let mut tx = self.write_db.begin().await?;

        if super::load_many(&mut tx, vec![id.to_owned()])
            .await?
            .is_empty()
        {
            mealbook_shared::not_found!("ingredient {id}");
        }

        if super::find_id_by_name(&mut tx, &input.name, Some(&id))
            .await?
            .is_some()
        {
            mealbook_shared::user!("ingredient '{}' already exists", input.name);
        }

        let (sql, values) = Query::update()
            .table(Ingredient::Table)
            .values([
                (Ingredient::Name, input.name.into()),
                (Ingredient::Unit, input.unit.to_string().into()),
                (Ingredient::Category, input.category.to_string().into()),
                (Ingredient::Calories, input.nutrition.calories.into()),
                (Ingredient::Protein, input.nutrition.protein.into()),
                (Ingredient::Carbohydrates, input.nutrition.carbohydrates.into()),
                (Ingredient::Fat, input.nutrition.fat.into()),
            ])
            .and_where(Expr::col(Ingredient::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let refreshed = crate::root::refresh_recipes_using(&mut tx, &id).await?;
        tx.commit().await?;

        tracing::info!(ingredient.id = %id, recipes = refreshed, "ingredient updated");

        Ok(())
    }
}
