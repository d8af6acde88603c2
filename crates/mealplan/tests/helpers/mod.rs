#![allow(dead_code)]

use mealbook_mealplan::{Command, CreatePlanInput};
use mealbook_recipe::CreateInput;
use mealbook_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};
use time::Date;

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mealbook_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::single(pool))
}

pub async fn create_recipe(state: &State, name: &str) -> anyhow::Result<String> {
    Ok(mealbook_recipe::Command::new(state.clone())
        .create(CreateInput {
            name: name.to_owned(),
            ..Default::default()
        })
        .await?)
}

pub async fn create_planner(
    state: &State,
    name: &str,
    start: Date,
    end: Date,
) -> anyhow::Result<String> {
    Ok(Command::new(state.clone())
        .create(CreatePlanInput {
            name: name.to_owned(),
            start,
            end,
        })
        .await?)
}
