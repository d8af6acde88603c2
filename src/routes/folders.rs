use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use mealbook_recipe::folder::{CreateFolderInput, DeleteMode, Folder, FolderNode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Serialize)]
pub struct FolderView {
    pub folder: Folder,
    /// From the root down to the folder itself.
    pub path: Vec<Folder>,
    pub children: Vec<Folder>,
}

#[derive(Debug, Deserialize)]
pub struct RenameBody {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveBody {
    pub parent_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub mode: DeleteMode,
}

pub async fn tree(State(app): State<AppState>) -> Result<Json<Vec<FolderNode>>, AppError> {
    let tree = mealbook_recipe::folder::Query(app.state).tree().await?;

    Ok(Json(tree))
}

pub async fn find(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FolderView>, AppError> {
    let query = mealbook_recipe::folder::Query(app.state);
    let Some(folder) = query.find(&id).await? else {
        return Err(super::not_found(format!("folder {id}")));
    };

    let path = query.path(&id).await?;
    let children = query.children(Some(&id)).await?;

    Ok(Json(FolderView {
        folder,
        path,
        children,
    }))
}

pub async fn create(
    State(app): State<AppState>,
    Json(input): Json<CreateFolderInput>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let id = app.folder_command.create(input).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn rename(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RenameBody>,
) -> Result<StatusCode, AppError> {
    app.folder_command.rename(id, body.name).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn move_to(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<MoveBody>,
) -> Result<StatusCode, AppError> {
    app.folder_command.move_to(id, body.parent_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, AppError> {
    app.folder_command.delete(id, params.mode).await?;

    Ok(StatusCode::NO_CONTENT)
}
