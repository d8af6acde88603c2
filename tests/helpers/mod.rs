#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use mealbook::Config;
use serde_json::Value;
use std::path::Path;
use tower::ServiceExt;

pub async fn setup_test_app(path: &Path) -> anyhow::Result<Router> {
    let url = format!("sqlite:{}", path.to_str().unwrap());
    let pool = mealbook::db::create_pool(&url, 1).await?;
    mealbook::db::migrate(&pool).await?;

    let mut config = Config::load(Some("config/default.toml".to_owned()))?;
    config.database.url = url;

    Ok(mealbook::create_app(config, pool))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => request.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}

pub async fn create(app: &Router, uri: &str, body: Value) -> anyhow::Result<String> {
    let (status, value) = send(app, Method::POST, uri, Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED, "{uri}: {value}");

    Ok(value["id"].as_str().unwrap_or_default().to_owned())
}
