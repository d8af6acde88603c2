use axum::{
    Router,
    routing::{delete, get, post, put},
};
use mealbook_recipe::{folder, import, ingredient};
use sqlx::SqlitePool;

mod folders;
mod health;
mod imports;
mod ingredients;
mod plans;
mod recipes;
mod shopping;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub state: mealbook_shared::State,
    pub recipe_command: mealbook_recipe::Command,
    pub ingredient_command: ingredient::Command,
    pub folder_command: folder::Command,
    pub import_command: import::Command,
    pub plan_command: mealbook_mealplan::Command,
    pub shopping_command: mealbook_shopping::Command,
}

impl AppState {
    pub fn new(config: crate::config::Config, state: mealbook_shared::State) -> Self {
        Self {
            config,
            recipe_command: mealbook_recipe::Command::new(state.clone()),
            ingredient_command: ingredient::Command::new(state.clone()),
            folder_command: folder::Command::new(state.clone()),
            import_command: import::Command::new(state.clone()),
            plan_command: mealbook_mealplan::Command::new(state.clone()),
            shopping_command: mealbook_shopping::Command::new(state.clone()),
            state,
        }
    }

    fn pool(&self) -> SqlitePool {
        self.state.read_db.clone()
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool())
        .merge(api(app_state))
}

fn api(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/ingredients",
            get(ingredients::list).post(ingredients::create),
        )
        .route(
            "/api/ingredients/{id}",
            get(ingredients::find)
                .put(ingredients::update)
                .delete(ingredients::delete),
        )
        .route("/api/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/api/recipes/{id}",
            get(recipes::find)
                .put(recipes::update)
                .delete(recipes::delete),
        )
        .route("/api/recipes/{id}/duplicate", post(recipes::duplicate))
        .route("/api/recipes/{id}/folder", put(recipes::move_to_folder))
        .route(
            "/api/recipes/{id}/ingredients",
            put(recipes::set_ingredients).post(recipes::add_ingredient),
        )
        .route(
            "/api/recipes/{id}/ingredients/{position}",
            delete(recipes::remove_ingredient),
        )
        .route("/api/folders", get(folders::tree).post(folders::create))
        .route(
            "/api/folders/{id}",
            get(folders::find)
                .put(folders::rename)
                .delete(folders::delete),
        )
        .route("/api/folders/{id}/parent", put(folders::move_to))
        .route("/api/import", post(imports::import))
        .route("/api/import/preview", post(imports::preview))
        .route("/api/plans", get(plans::list).post(plans::create))
        .route(
            "/api/plans/{id}",
            get(plans::find).put(plans::rename).delete(plans::delete),
        )
        .route("/api/plans/{id}/range", put(plans::reschedule))
        .route("/api/plans/{id}/meals", post(plans::add_meal))
        .route("/api/plans/{id}/copy-day", post(plans::copy_day))
        .route(
            "/api/meals/{id}",
            put(plans::update_meal).delete(plans::remove_meal),
        )
        .route(
            "/api/shopping",
            get(shopping::lists).post(shopping::generate),
        )
        .route(
            "/api/shopping/{id}",
            get(shopping::load).delete(shopping::delete),
        )
        .route("/api/shopping/{id}/reset", post(shopping::reset))
        .route("/api/shopping/{id}/prune", post(shopping::prune))
        .route(
            "/api/shopping/{id}/items/{ingredient_id}/toggle",
            post(shopping::toggle),
        )
        .route(
            "/api/shopping/{id}/items/{ingredient_id}/quantity",
            put(shopping::set_quantity),
        )
        .with_state(app_state)
}

fn not_found(what: impl std::fmt::Display) -> crate::error::AppError {
    mealbook_shared::Error::NotFound(what.to_string()).into()
}
