use axum::{Json, extract::State, http::StatusCode};
use mealbook_recipe::import::{ImportOptions, ImportOutcome, ImportPreview};
use serde::Deserialize;
use std::time::Duration;

use crate::{error::AppError, routes::AppState};

/// Page to import, given inline or as a URL to download.
#[derive(Debug, Deserialize)]
pub struct ImportBody {
    pub html: Option<String>,
    pub url: Option<String>,
    pub folder_id: Option<String>,
    pub create_missing: Option<bool>,
    pub threshold: Option<f64>,
}

impl ImportBody {
    async fn page(&self, app: &AppState) -> Result<String, AppError> {
        match (self.html.as_deref(), self.url.as_deref()) {
            (Some(html), _) => Ok(html.to_owned()),
            (None, Some(url)) => {
                let timeout = Duration::from_secs(app.config.import.fetch_timeout_secs);

                Ok(crate::fetch::fetch(url, timeout).await?)
            }
            (None, None) => Err(mealbook_shared::Error::User(
                "either html or url is required".to_owned(),
            )
            .into()),
        }
    }

    fn threshold(&self, app: &AppState) -> f64 {
        self.threshold.unwrap_or(app.config.import.match_threshold)
    }
}

pub async fn preview(
    State(app): State<AppState>,
    Json(body): Json<ImportBody>,
) -> Result<Json<ImportPreview>, AppError> {
    let html = body.page(&app).await?;
    let preview = app
        .import_command
        .preview(&html, Some(body.threshold(&app)))
        .await?;

    Ok(Json(preview))
}

#[tracing::instrument(skip_all, fields(url = ?body.url))]
pub async fn import(
    State(app): State<AppState>,
    Json(body): Json<ImportBody>,
) -> Result<(StatusCode, Json<ImportOutcome>), AppError> {
    let html = body.page(&app).await?;
    let options = ImportOptions {
        folder_id: body.folder_id.to_owned(),
        create_missing: body
            .create_missing
            .unwrap_or(app.config.import.create_missing),
        threshold: Some(body.threshold(&app)),
    };

    let outcome = app.import_command.import(&html, options).await?;

    Ok((StatusCode::CREATED, Json(outcome)))
}
