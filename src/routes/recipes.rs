use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use mealbook_recipe::{
    CreateInput, FolderFilter, IngredientLine, RecipeDetail, RecipeSummary, RecipesQuery, SortBy,
    UpdateInput,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Folder id, or `root` for recipes outside every folder.
    pub folder: Option<String>,
    /// Include the recipes of sub-folders.
    #[serde(default)]
    pub recursive: bool,
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortBy,
}

impl From<ListParams> for RecipesQuery {
    fn from(params: ListParams) -> Self {
        let folder = match params.folder {
            None => FolderFilter::Any,
            Some(folder) if folder == "root" => FolderFilter::Root,
            Some(folder) if params.recursive => FolderFilter::Within(folder),
            Some(folder) => FolderFilter::In(folder),
        };

        RecipesQuery {
            folder,
            search: params.search,
            sort: params.sort,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FolderBody {
    pub folder_id: Option<String>,
}

pub async fn list(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    let recipes = mealbook_recipe::Query(app.state)
        .list(params.into())
        .await?;

    Ok(Json(recipes))
}

pub async fn find(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetail>, AppError> {
    let Some(recipe) = mealbook_recipe::Query(app.state).find(&id).await? else {
        return Err(super::not_found(format!("recipe {id}")));
    };

    Ok(Json(recipe))
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(app): State<AppState>,
    Json(input): Json<CreateInput>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = app.recipe_command.create(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateInput>,
) -> Result<StatusCode, AppError> {
    app.recipe_command.update(id, input).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.recipe_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn duplicate(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = app.recipe_command.duplicate(id).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn move_to_folder(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<FolderBody>,
) -> Result<StatusCode, AppError> {
    app.recipe_command.move_to_folder(id, body.folder_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_ingredients(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(lines): Json<Vec<IngredientLine>>,
) -> Result<StatusCode, AppError> {
    app.recipe_command.set_ingredients(id, lines).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_ingredient(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(line): Json<IngredientLine>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let position = app.recipe_command.add_ingredient(id, line).await?;

    Ok((StatusCode::CREATED, Json(json!({ "position": position }))))
}

pub async fn remove_ingredient(
    State(app): State<AppState>,
    Path((id, position)): Path<(String, u32)>,
) -> Result<StatusCode, AppError> {
    app.recipe_command.remove_ingredient(id, position).await?;

    Ok(StatusCode::NO_CONTENT)
}
