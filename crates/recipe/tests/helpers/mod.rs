#![allow(dead_code)]

use mealbook_recipe::ingredient::{self, CreateIngredientInput};
use mealbook_shared::{
    State,
    recipe::{IngredientCategory, Nutrition, Unit},
};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};

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

pub async fn create_ingredient(
    state: &State,
    name: &str,
    unit: Unit,
    calories: f64,
) -> anyhow::Result<String> {
    let id = ingredient::Command::new(state.clone())
        .create(CreateIngredientInput {
            name: name.to_owned(),
            unit,
            category: IngredientCategory::Grocery,
            nutrition: Nutrition {
                calories,
                ..Default::default()
            },
        })
        .await?;

    Ok(id)
}
