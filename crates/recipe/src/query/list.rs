use mealbook_db::table::Recipe;
use mealbook_shared::{name_contains, normalize_name, recipe::Nutrition};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub enum FolderFilter {
    #[default]
    Any,
    /// Recipes outside every folder.
    Root,
    In(String),
    /// The folder and all of its descendants.
    Within(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub enum SortBy {
    #[default]
    Name,
    Newest,
    Calories,
}

#[derive(Debug, Clone, Default)]
pub struct RecipesQuery {
    pub folder: FolderFilter,
    pub search: Option<String>,
    pub sort: SortBy,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub folder_id: Option<String>,
    pub name: String,
    pub servings: u32,
    pub nutrition: Nutrition,
    pub created_at: i64,
}

#[derive(FromRow)]
struct RecipeListRow {
    id: String,
    folder_id: Option<String>,
    name: String,
    servings: u32,
    calories: f64,
    protein: f64,
    carbohydrates: f64,
    fat: f64,
    created_at: i64,
}

impl From<RecipeListRow> for RecipeSummary {
    fn from(row: RecipeListRow) -> Self {
        Self {
            id: row.id,
            folder_id: row.folder_id,
            name: row.name,
            servings: row.servings,
            nutrition: Nutrition {
                calories: row.calories,
                protein: row.protein,
                carbohydrates: row.carbohydrates,
                fat: row.fat,
            },
            created_at: row.created_at,
        }
    }
}

impl super::Query {
    pub async fn list(&self, query: RecipesQuery) -> anyhow::Result<Vec<RecipeSummary>> {
        let mut statement = sea_query::Query::select()
            .columns([
                Recipe::Id,
                Recipe::FolderId,
                Recipe::Name,
                Recipe::Servings,
                Recipe::Calories,
                Recipe::Protein,
                Recipe::Carbohydrates,
                Recipe::Fat,
                Recipe::CreatedAt,
            ])
            .from(Recipe::Table)
            .to_owned();

        match query.folder {
            FolderFilter::Any => {}
            FolderFilter::Root => {
                statement.and_where(Expr::col(Recipe::FolderId).is_null());
            }
            FolderFilter::In(folder_id) => {
                statement.and_where(Expr::col(Recipe::FolderId).eq(folder_id));
            }
            FolderFilter::Within(folder_id) => {
                let hierarchy = crate::folder::Query(self.0.clone()).hierarchy().await?;
                let mut ids = hierarchy.descendant_ids(&folder_id);
                ids.push(folder_id);
                statement.and_where(Expr::col(Recipe::FolderId).is_in(ids));
            }
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeListRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut recipes = rows
            .into_iter()
            .map(RecipeSummary::from)
            .filter(|r| search.is_none_or(|s| name_contains(&r.name, s)))
            .collect::<Vec<_>>();

        sort_recipes(&mut recipes, query.sort);

        Ok(recipes)
    }
}

/// Names sort case-insensitively, ids break ties.
fn sort_recipes(recipes: &mut [RecipeSummary], sort: SortBy) {
    match sort {
        SortBy::Name => {
            recipes.sort_by_cached_key(|r| (normalize_name(&r.name), r.id.to_owned()));
        }
        SortBy::Newest => {
            recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        }
        SortBy::Calories => {
            recipes.sort_by(|a, b| {
                a.nutrition
                    .calories
                    .total_cmp(&b.nutrition.calories)
                    .then_with(|| normalize_name(&a.name).cmp(&normalize_name(&b.name)))
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
    }
}
