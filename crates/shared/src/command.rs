#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    User(String),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<time::error::ComponentRange> for Error {
    fn from(value: time::error::ComponentRange) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<sea_query::error::Error> for Error {
    fn from(value: sea_query::error::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Server(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! not_found {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::NotFound(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::NotFound(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! user {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::User(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::User(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(found: bool) -> Result<()> {
        if !found {
            crate::not_found!("recipe {}", "01H");
        }

        Ok(())
    }

    fn check(portions: u32) -> Result<()> {
        if portions == 0 {
            crate::user!("portions must be at least 1");
        }

        Ok(())
    }

    #[derive(sea_query::Iden)]
    enum Item {
        Table,
        Id,
        Name,
    }

    fn insert_one_value() -> Result<()> {
        sea_query::Query::insert()
            .into_table(Item::Table)
            .columns([Item::Id, Item::Name])
            .values(["01H".into()])?;

        Ok(())
    }

    #[test]
    fn test_query_builder_errors_convert() {
        assert!(matches!(insert_one_value().unwrap_err(), Error::Unknown(_)));
    }

    #[test]
    fn test_macros_return_matching_variant() {
        assert_eq!(lookup(false).unwrap_err().to_string(), "recipe 01H not found");
        assert!(lookup(true).is_ok());

        let err = check(0).unwrap_err();
        assert!(matches!(err, Error::User(_)));
        assert_eq!(err.to_string(), "portions must be at least 1");
    }
}
