use mealbook_db::table::Recipe;
use mealbook_shared::recipe::{IngredientCategory, Nutrition, Unit};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Serialize)]
pub struct RecipeLine {
    pub position: u32,
    pub ingredient_id: String,
    pub name: String,
    pub unit: Unit,
    pub category: IngredientCategory,
    pub quantity: f64,
    pub formatted_quantity: String,
    pub note: Option<String>,
    pub nutrition: Nutrition,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: String,
    pub folder_id: Option<String>,
    pub name: String,
    pub description: String,
    pub servings: u32,
    pub instructions: String,
    pub source_url: Option<String>,
    pub nutrition: Nutrition,
    pub per_serving: Nutrition,
    pub ingredients: Vec<RecipeLine>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

#[derive(FromRow)]
struct RecipeRow {
    id: String,
    folder_id: Option<String>,
    name: String,
    description: String,
    servings: u32,
    instructions: String,
    source_url: Option<String>,
    calories: f64,
    protein: f64,
    carbohydrates: f64,
    fat: f64,
    created_at: i64,
    updated_at: Option<i64>,
}

impl super::Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<RecipeDetail>> {
        let id = id.into();
        let (sql, values) = sea_query::Query::select()
            .columns([
                Recipe::Id,
                Recipe::FolderId,
                Recipe::Name,
                Recipe::Description,
                Recipe::Servings,
                Recipe::Instructions,
                Recipe::SourceUrl,
                Recipe::Calories,
                Recipe::Protein,
                Recipe::Carbohydrates,
                Recipe::Fat,
                Recipe::CreatedAt,
                Recipe::UpdatedAt,
            ])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(&id))
            .build_sqlx(SqliteQueryBuilder);

        let mut conn = self.read_db.acquire().await?;
        let Some(row) = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };

        let ingredients = crate::root::load_lines(&mut conn, &id)
            .await?
            .into_iter()
            .map(|line| {
                let per_unit = line.nutrition();
                RecipeLine {
                    position: line.position,
                    formatted_quantity: line.unit.0.format(line.quantity),
                    nutrition: crate::nutrition::line_nutrition(
                        line.unit.0,
                        &per_unit,
                        line.quantity,
                    ),
                    ingredient_id: line.ingredient_id,
                    name: line.name,
                    unit: line.unit.0,
                    category: line.category.0,
                    quantity: line.quantity,
                    note: line.note,
                }
            })
            .collect();

        let nutrition = Nutrition {
            calories: row.calories,
            protein: row.protein,
            carbohydrates: row.carbohydrates,
            fat: row.fat,
        };

        Ok(Some(RecipeDetail {
            id: row.id,
            folder_id: row.folder_id,
            name: row.name,
            description: row.description,
            servings: row.servings,
            instructions: row.instructions,
            source_url: row.source_url,
            per_serving: crate::nutrition::per_serving(&nutrition, row.servings),
            nutrition,
            ingredients,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}
