use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use mealbook_mealplan::{AddMealInput, CreatePlanInput, DayMeals, Plan, UpdateMealInput};
use mealbook_shared::mealplan::PlanKind;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::Date;

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub kind: Option<PlanKind>,
}

#[derive(Debug, Serialize)]
pub struct PlanView {
    pub plan: Plan,
    pub days: Vec<DayMeals>,
}

#[derive(Debug, Deserialize)]
pub struct RenameBody {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RangeBody {
    pub start: Date,
    pub end: Date,
}

#[derive(Debug, Deserialize)]
pub struct CopyDayBody {
    pub from: Date,
    pub to: Date,
}

pub async fn list(
    State(app): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Plan>>, AppError> {
    let plans = mealbook_mealplan::Query(app.state)
        .list(params.kind)
        .await?;

    Ok(Json(plans))
}

pub async fn find(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlanView>, AppError> {
    let query = mealbook_mealplan::Query(app.state);
    let Some(plan) = query.find(&id).await? else {
        return Err(super::not_found(format!("plan {id}")));
    };

    let days = match plan.kind {
        PlanKind::Planner => query.days(&id).await?.unwrap_or_default(),
        PlanKind::ShoppingList => vec![],
    };

    Ok(Json(PlanView { plan, days }))
}

pub async fn create(
    State(app): State<AppState>,
    Json(input): Json<CreatePlanInput>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = app.plan_command.create(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn rename(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RenameBody>,
) -> Result<StatusCode, AppError> {
    app.plan_command.rename(id, body.name).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn reschedule(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RangeBody>,
) -> Result<StatusCode, AppError> {
    app.plan_command.reschedule(id, body.start, body.end).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.plan_command.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_meal(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<AddMealInput>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = app.plan_command.add_meal(id, input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn copy_day(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CopyDayBody>,
) -> Result<Json<Value>, AppError> {
    let copied = app.plan_command.copy_day(id, body.from, body.to).await?;

    Ok(Json(json!({ "copied": copied })))
}

pub async fn update_meal(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateMealInput>,
) -> Result<StatusCode, AppError> {
    app.plan_command.update_meal(id, input).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_meal(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.plan_command.remove_meal(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
