pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod fetch;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use error::AppError;
pub use routes::AppState;

/// Router over an already migrated pool, used by integration tests.
pub fn create_app(config: Config, pool: sqlx::SqlitePool) -> axum::Router {
    routes::router(AppState::new(config, mealbook_shared::State::single(pool)))
}
