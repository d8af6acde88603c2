use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::str::FromStr;
use temp_dir::TempDir;

const TABLES: [&str; 7] = [
    "folder",
    "ingredient",
    "recipe",
    "recipe_ingredient",
    "plan",
    "planned_meal",
    "shopping_list_item",
];

async fn tables(pool: &SqlitePool) -> anyhow::Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' AND name NOT LIKE 'sqlite%' ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}

#[tokio::test]
async fn test_apply_and_revert() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;

    let migrator = mealbook_db::migrator()?;
    migrator.run(&mut conn, &Plan::apply_all()).await?;
    migrator.run(&mut conn, &Plan::apply_all()).await?;

    let mut expected = TABLES.map(str::to_owned).to_vec();
    expected.sort();
    assert_eq!(tables(&pool).await?, expected);

    migrator.run(&mut conn, &Plan::revert_all()).await?;
    assert!(tables(&pool).await?.is_empty());

    Ok(())
}
