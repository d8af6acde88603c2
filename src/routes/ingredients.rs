use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use mealbook_recipe::ingredient::{CreateIngredientInput, Ingredient, UpdateIngredientInput};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

pub async fn list(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    let ingredients = mealbook_recipe::ingredient::Query(app.state)
        .list(params.search.as_deref())
        .await?;

    Ok(Json(ingredients))
}

pub async fn find(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ingredient>, AppError> {
    let Some(ingredient) = mealbook_recipe::ingredient::Query(app.state)
        .find(&id)
        .await?
    else {
        return Err(super::not_found(format!("ingredient {id}")));
    };

    Ok(Json(ingredient))
}

pub async fn create(
    State(app): State<AppState>,
    Json(input): Json<CreateIngredientInput>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = app.ingredient_command.create(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn update(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateIngredientInput>,
) -> Result<StatusCode, AppError> {
    app.ingredient_command.update(id, input).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.ingredient_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
