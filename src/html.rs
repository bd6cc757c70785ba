//! Formatting shared by the dashboard's views.

use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

/// The currency sign shown after every amount.
pub const CURRENCY_SIGN: &str = "₽";

const CREATED_AT_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Write a number the way the server sends it: whole numbers without a
/// fractional part, e.g. `100` rather than `100.0`.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Format an amount of money for display, without the currency sign.
pub fn format_sum(sum: f64) -> String {
    format_number(sum)
}

/// Format a server timestamp such as `2019-03-10 03:20:41` as
/// `10 марта 2019 г. в 03:20`.
///
/// Timestamps in any other format are returned unchanged.
pub fn format_date(created_at: &str) -> String {
    match PrimitiveDateTime::parse(created_at, CREATED_AT_FORMAT) {
        Ok(date_time) => format!(
            "{:02} {} {} г. в {:02}:{:02}",
            date_time.day(),
            MONTHS_GENITIVE[usize::from(u8::from(date_time.month())) - 1],
            date_time.year(),
            date_time.hour(),
            date_time.minute()
        ),
        Err(error) => {
            tracing::debug!("could not parse date {created_at:?}: {error}");
            created_at.to_owned()
        }
    }
}
