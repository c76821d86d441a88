use chrono::{Datelike, NaiveDate};

pub const FULL_MONTH: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// First day of the month. `month` is a 0-based index (0 = January).
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if month > 11 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)
}

/// Last day of the month, taken as "day 0" of the following month.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if month > 11 {
        return None;
    }
    let following = if month == 11 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    }?;
    following.pred_opt()
}

/// Weekday of `date`, 0 = Sunday.
pub fn weekday_of(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

pub fn month_name(month: u32) -> Option<&'static str> {
    FULL_MONTH.get(month as usize).copied()
}
