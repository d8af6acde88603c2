use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use mealbook_mealplan::Plan;
use mealbook_shopping::{GenerateInput, ShoppingList};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct LoadParams {
    #[serde(default)]
    pub checked_last: bool,
}

#[derive(Debug, Deserialize)]
pub struct QuantityBody {
    pub quantity: Option<f64>,
}

pub async fn lists(State(app): State<AppState>) -> Result<Json<Vec<Plan>>, AppError> {
    let lists = mealbook_shopping::Query(app.state).lists().await?;

    Ok(Json(lists))
}

pub async fn load(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LoadParams>,
) -> Result<Json<ShoppingList>, AppError> {
    let Some(list) = mealbook_shopping::Query(app.state)
        .load(&id, params.checked_last)
        .await?
    else {
        return Err(super::not_found(format!("shopping list {id}")));
    };

    Ok(Json(list))
}

pub async fn generate(
    State(app): State<AppState>,
    Json(input): Json<GenerateInput>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = app.shopping_command.generate(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn delete(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.shopping_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle(
    State(app): State<AppState>,
    Path((id, ingredient_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let checked = app.shopping_command.toggle(id, ingredient_id).await?;

    Ok(Json(json!({ "checked": checked })))
}

pub async fn set_quantity(
    State(app): State<AppState>,
    Path((id, ingredient_id)): Path<(String, String)>,
    Json(body): Json<QuantityBody>,
) -> Result<StatusCode, AppError> {
    app.shopping_command
        .set_quantity(id, ingredient_id, body.quantity)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.shopping_command.reset(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn prune(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let pruned = app.shopping_command.prune(id).await?;

    Ok(Json(json!({ "pruned": pruned })))
}
