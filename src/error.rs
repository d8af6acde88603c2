use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] mealbook_shared::Error),

    #[error("Internal server error")]
    InternalError(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Domain(mealbook_shared::Error::Unknown(err))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Domain(err.into())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Domain(mealbook_shared::Error::Validate(_))
            | AppError::Domain(mealbook_shared::Error::User(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Domain(mealbook_shared::Error::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match self {
            AppError::Domain(mealbook_shared::Error::Validate(errors)) => {
                let details = serde_json::to_value(&errors).unwrap_or_default();
                let body = json!({
                    "error": "ValidationFailed",
                    "message": "Invalid input provided.",
                    "details": details,
                });

                return (status, Json(body)).into_response();
            }
            AppError::Domain(mealbook_shared::Error::User(msg)) => ("InvalidRequest", msg),
            AppError::Domain(mealbook_shared::Error::NotFound(what)) => {
                ("NotFound", format!("{what} not found"))
            }
            AppError::Domain(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    "InternalServerError",
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    "InternalServerError",
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": error, "message": message }))).into_response()
    }
}
