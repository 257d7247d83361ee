use chrono::{Datelike, NaiveDate, Weekday};

/// Jours de `[start, end]`.
pub(super) fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Jours ouvrés (lundi à vendredi) de `[start, end]`.
pub(super) fn workdays(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    days_between(start, end).filter(|d| !is_weekend(*d))
}

/// Lundis de `[start, end]`.
pub(super) fn mondays(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    days_between(start, end).filter(|d| d.weekday() == Weekday::Mon)
}

pub(super) fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}
