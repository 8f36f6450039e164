use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

/// Standalone (nominative) Russian month names, capitalized, January first.
pub static MONTHS_RU: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

/// Month name for a 1-based month number.
#[must_use]
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTHS_RU.get(idx).copied()
}

/// Name of the month `now` falls in when observed from `tz`.
#[must_use]
pub fn month_name_at(now: DateTime<Utc>, tz: Tz) -> &'static str {
    let local = now.with_timezone(&tz);
    MONTHS_RU
        .get(local.month0() as usize)
        .copied()
        .unwrap_or(MONTHS_RU[0])
}
