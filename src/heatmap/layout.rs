//! Week-column layout of a calendar year, Monday at the top.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};

pub const DAYS_PER_WEEK: usize = 7;

/// Stagger between neighbouring cells in the initial wave animation.
const WAVE_STEP_MS: u32 = 4;

/// One vertical band of the grid. Slot 0 is Monday, slot 6 is Sunday.
/// Days outside the selected year are `None` but still occupy their slot.
pub type WeekColumn = [Option<NaiveDate>; DAYS_PER_WEEK];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: Option<NaiveDate>,
    pub column: usize,
    /// 0 = Monday .. 6 = Sunday
    pub row: usize,
}

/// First Monday on or before Jan 1 and last Sunday on or after Dec 31.
pub fn grid_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let jan_1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let dec_31 = NaiveDate::from_ymd_opt(year, 12, 31)?;

    let first_monday = jan_1 - Duration::days(i64::from(jan_1.weekday().num_days_from_monday()));
    let last_sunday =
        dec_31 + Duration::days(6 - i64::from(dec_31.weekday().num_days_from_monday()));

    Some((first_monday, last_sunday))
}

/// Builds the week columns for `year`.
///
/// Works on calendar dates only, so there is no time-of-day that a
/// daylight-saving transition could shift onto a neighbouring day.
pub fn build_week_columns(year: i32) -> Vec<WeekColumn> {
    let Some((first_monday, last_sunday)) = grid_bounds(year) else {
        return Vec::new();
    };

    let mut weeks: Vec<WeekColumn> = Vec::with_capacity(54);
    for (index, day) in first_monday.iter_days().take_while(|d| *d <= last_sunday).enumerate() {
        let column = index / DAYS_PER_WEEK;
        if weeks.len() <= column {
            weeks.push([None; DAYS_PER_WEEK]);
        }
        let row = day.weekday().num_days_from_monday() as usize;
        weeks[column][row] = (day.year() == year).then_some(day);
    }

    weeks
}

/// The same layout flattened into cells, column by column.
pub fn cells(year: i32) -> Vec<CalendarCell> {
    build_week_columns(year)
        .iter()
        .enumerate()
        .flat_map(|(column, week)| {
            week.iter()
                .enumerate()
                .map(move |(row, date)| CalendarCell {
                    date: *date,
                    column,
                    row,
                })
        })
        .collect()
}

/// Column and row of `date` in the grid of its own year.
pub fn position_of(date: NaiveDate) -> Option<(usize, usize)> {
    let (first_monday, _) = grid_bounds(date.year())?;
    let offset = (date - first_monday).num_days() as usize;
    Some((offset / DAYS_PER_WEEK, offset % DAYS_PER_WEEK))
}

/// Years offered in the year selector: every year with data, plus the
/// current and the next year, ascending.
pub fn year_options(
    entry_years: impl IntoIterator<Item = i32>,
    diary_years: impl IntoIterator<Item = i32>,
    current_year: i32,
) -> Vec<i32> {
    let mut years: BTreeSet<i32> = entry_years.into_iter().collect();
    years.extend(diary_years);
    years.insert(current_year);
    years.insert(current_year + 1);
    years.into_iter().collect()
}

/// Keeps `preferred` if it is offered, otherwise falls back to the newest option.
pub fn resolve_year(options: &[i32], preferred: i32) -> i32 {
    if options.contains(&preferred) {
        preferred
    } else {
        options.last().copied().unwrap_or(preferred)
    }
}

/// Moves `delta` positions through `options`, stopping at either end.
pub fn step_year(options: &[i32], current: i32, delta: i32) -> i32 {
    if options.is_empty() {
        return current;
    }
    let index = options.iter().position(|y| *y == current).unwrap_or(0) as i64;
    let next = (index + i64::from(delta)).clamp(0, options.len() as i64 - 1);
    options[next as usize]
}

/// Delay of the sweep animation for a cell, growing down then across.
pub fn wave_delay_ms(column: usize, row: usize) -> u32 {
    ((column * DAYS_PER_WEEK + row) as u32) * WAVE_STEP_MS
}
