mod command;
mod date;
pub mod mealplan;
pub mod recipe;

pub use command::*;
pub use date::*;

#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    /// Same pool for reads and writes, used by the CLI and tests.
    pub fn single(pool: sqlx::SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}

/// Unix timestamp in seconds.
pub fn now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

/// Trim and collapse inner whitespace, keeping case.
pub fn clean_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison form of a name: cleaned and lowercased.
pub fn normalize_name(name: &str) -> String {
    clean_name(name).to_lowercase()
}

/// Case-insensitive substring test on cleaned names, Unicode aware.
pub fn name_contains(name: &str, search: &str) -> bool {
    normalize_name(name).contains(&normalize_name(search))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("  Red   Onion "), "Red Onion");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Red   Onion "), "red onion");
        assert_eq!(normalize_name("TOMATO"), "tomato");
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("ŻUREK"), "żurek");
    }

    #[test]
    fn test_name_contains() {
        assert!(name_contains("Łosoś pieczony", "ŁOSOŚ"));
        assert!(name_contains("Cherry  Tomato", "y t"));
        assert!(!name_contains("Pancakes", "%"));
        assert!(!name_contains("Pancakes", "_"));
        assert!(name_contains("100% rye", "100%"));
    }
}
