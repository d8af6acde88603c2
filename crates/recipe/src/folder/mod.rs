mod create;
mod delete;
mod hierarchy;
mod update;

pub use create::CreateFolderInput;
pub use delete::DeleteMode;
pub use hierarchy::{FolderNode, Hierarchy};

use mealbook_db::table::{Folder as FolderTable, Recipe};
use mealbook_shared::normalize_name;
use sea_query::{Expr, ExprTrait, Order, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteConnection, prelude::FromRow};
use std::{collections::HashMap, ops::Deref};

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct Folder {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub created_at: i64,
}

const COLUMNS: [FolderTable; 4] = [
    FolderTable::Id,
    FolderTable::ParentId,
    FolderTable::Name,
    FolderTable::CreatedAt,
];

#[derive(Clone)]
pub struct Command {
    state: mealbook_shared::State,
}

impl Deref for Command {
    type Target = mealbook_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: mealbook_shared::State) -> Self {
        Self { state }
    }
}

#[derive(Clone)]
pub struct Query(pub mealbook_shared::State);

impl Deref for Query {
    type Target = mealbook_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<Folder>> {
        let (sql, values) = SeaQuery::select()
            .columns(COLUMNS)
            .from(FolderTable::Table)
            .and_where(Expr::col(FolderTable::Id).eq(id.into()))
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Folder, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    pub async fn hierarchy(&self) -> anyhow::Result<Hierarchy> {
        let mut conn = self.read_db.acquire().await?;

        load_hierarchy(&mut conn).await
    }

    pub async fn children(&self, parent_id: Option<&str>) -> anyhow::Result<Vec<Folder>> {
        let mut statement = SeaQuery::select()
            .columns(COLUMNS)
            .from(FolderTable::Table)
            .order_by(FolderTable::Name, Order::Asc)
            .to_owned();

        match parent_id {
            Some(id) => statement.and_where(Expr::col(FolderTable::ParentId).eq(id)),
            None => statement.and_where(Expr::col(FolderTable::ParentId).is_null()),
        };

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut folders = sqlx::query_as_with::<_, Folder, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        folders.sort_by_key(|f| normalize_name(&f.name));

        Ok(folders)
    }

    pub async fn path(&self, id: &str) -> anyhow::Result<Vec<Folder>> {
        let hierarchy = self.hierarchy().await?;

        Ok(hierarchy.path(id).into_iter().cloned().collect())
    }

    pub async fn descendant_ids(&self, id: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.hierarchy().await?.descendant_ids(id))
    }

    pub async fn tree(&self) -> anyhow::Result<Vec<FolderNode>> {
        let hierarchy = self.hierarchy().await?;

        let (sql, values) = SeaQuery::select()
            .column(Recipe::FolderId)
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::FolderId).is_not_null())
            .build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let mut counts = HashMap::new();
        for (folder_id,) in rows {
            *counts.entry(folder_id).or_insert(0) += 1;
        }

        Ok(hierarchy.tree(&counts))
    }
}

pub(crate) async fn load_hierarchy(conn: &mut SqliteConnection) -> anyhow::Result<Hierarchy> {
    let (sql, values) = SeaQuery::select()
        .columns(COLUMNS)
        .from(FolderTable::Table)
        .build_sqlx(SqliteQueryBuilder);

    let folders = sqlx::query_as_with::<_, Folder, _>(&sql, values)
        .fetch_all(&mut *conn)
        .await?;

    Ok(Hierarchy::new(folders))
}

pub(crate) async fn folder_exists(
    conn: &mut SqliteConnection,
    id: &str,
) -> anyhow::Result<bool> {
    let (sql, values) = SeaQuery::select()
        .column(FolderTable::Id)
        .from(FolderTable::Table)
        .and_where(Expr::col(FolderTable::Id).eq(id))
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?
        .is_some())
}

/// Id of a sibling under `parent_id` whose name equals `name` ignoring case.
pub(crate) async fn find_sibling(
    conn: &mut SqliteConnection,
    parent_id: Option<&str>,
    name: &str,
    exclude_id: Option<&str>,
) -> anyhow::Result<Option<String>> {
    let mut statement = SeaQuery::select()
        .columns([FolderTable::Id, FolderTable::Name])
        .from(FolderTable::Table)
        .to_owned();

    match parent_id {
        Some(id) => statement.and_where(Expr::col(FolderTable::ParentId).eq(id)),
        None => statement.and_where(Expr::col(FolderTable::ParentId).is_null()),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, (String, String), _>(&sql, values)
        .fetch_all(&mut *conn)
        .await?;

    let wanted = normalize_name(name);

    Ok(rows
        .into_iter()
        .filter(|(id, _)| Some(id.as_str()) != exclude_id)
        .find(|(_, n)| normalize_name(n) == wanted)
        .map(|(id, _)| id))
}
