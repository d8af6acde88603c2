#![allow(dead_code)]

use mealbook_mealplan::{AddMealInput, CreatePlanInput};
use mealbook_recipe::{
    CreateInput, IngredientLine,
    ingredient::{self, CreateIngredientInput},
};
use mealbook_shared::{
    State,
    mealplan::MealSlot,
    recipe::{IngredientCategory, Nutrition, Unit},
};
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

pub async fn create_ingredient(
    state: &State,
    name: &str,
    unit: Unit,
    category: IngredientCategory,
) -> anyhow::Result<String> {
    Ok(ingredient::Command::new(state.clone())
        .create(CreateIngredientInput {
            name: name.to_owned(),
            unit,
            category,
            nutrition: Nutrition::default(),
        })
        .await?)
}

pub async fn create_recipe<S: AsRef<str>>(
    state: &State,
    name: &str,
    servings: u32,
    lines: &[(S, f64)],
) -> anyhow::Result<String> {
    Ok(mealbook_recipe::Command::new(state.clone())
        .create(CreateInput {
            name: name.to_owned(),
            servings,
            ingredients: lines
                .iter()
                .map(|(id, quantity)| IngredientLine {
                    ingredient_id: id.as_ref().to_owned(),
                    quantity: *quantity,
                    note: None,
                })
                .collect(),
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
    Ok(mealbook_mealplan::Command::new(state.clone())
        .create(CreatePlanInput {
            name: name.to_owned(),
            start,
            end,
        })
        .await?)
}

pub async fn plan_meal(
    state: &State,
    plan_id: &str,
    recipe_id: &str,
    date: Date,
    portions: u32,
) -> anyhow::Result<String> {
    Ok(mealbook_mealplan::Command::new(state.clone())
        .add_meal(
            plan_id,
            AddMealInput {
                recipe_id: recipe_id.to_owned(),
                date,
                slot: MealSlot::Dinner,
                portions,
            },
        )
        .await?)
}
