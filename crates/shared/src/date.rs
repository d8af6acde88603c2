use time::{Date, macros::format_description};

/// Julian day number, the storage form of every calendar date.
pub fn to_day(date: Date) -> i32 {
    date.to_julian_day()
}

pub fn from_day(day: i32) -> crate::Result<Date> {
    Ok(Date::from_julian_day(day)?)
}

/// Parses `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> crate::Result<Date> {
    let format = format_description!("[year]-[month]-[day]");

    Date::parse(value.trim(), format)
        .map_err(|_| crate::Error::User(format!("invalid date '{value}', expected YYYY-MM-DD")))
}

pub fn format_date(date: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");

    date.format(format).unwrap_or_else(|_| date.to_string())
}

/// Number of days in the inclusive range.
pub fn days_inclusive(start: Date, end: Date) -> i64 {
    (end - start).whole_days() + 1
}
