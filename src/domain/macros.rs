use crate::domain::calendar_math;
use crate::domain::date_range::DateRange;
use crate::domain::day::{DayId, Slot};
use crate::domain::month_cache::{MonthCache, MonthKey};
use crate::domain::selection::RangeSelectionEngine;
use anyhow::anyhow;
use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Named preset ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroKind {
    Clear,
    Today,
    ThisWeek,
    LastWeek,
    ThisMonth,
    ThisYear,
    Last15Days,
    Last30Days,
    Last90Days,
}

impl MacroKind {
    pub const ALL: [MacroKind; 9] = [
        MacroKind::Clear,
        MacroKind::Today,
        MacroKind::ThisWeek,
        MacroKind::LastWeek,
        MacroKind::ThisMonth,
        MacroKind::ThisYear,
        MacroKind::Last15Days,
        MacroKind::Last30Days,
        MacroKind::Last90Days,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MacroKind::Clear => "clear",
            MacroKind::Today => "today",
            MacroKind::ThisWeek => "this-week",
            MacroKind::LastWeek => "last-week",
            MacroKind::ThisMonth => "this-month",
            MacroKind::ThisYear => "this-year",
            MacroKind::Last15Days => "last-15-days",
            MacroKind::Last30Days => "last-30-days",
            MacroKind::Last90Days => "last-90-days",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MacroKind::Clear => "Clear",
            MacroKind::Today => "Today",
            MacroKind::ThisWeek => "This week",
            MacroKind::LastWeek => "Last week",
            MacroKind::ThisMonth => "This month",
            MacroKind::ThisYear => "This year",
            MacroKind::Last15Days => "Last 15 days",
            MacroKind::Last30Days => "Last 30 days",
            MacroKind::Last90Days => "Last 90 days",
        }
    }

    /// Window length for the trailing "last N days" presets.
    pub fn trailing_days(&self) -> Option<u32> {
        match self {
            MacroKind::Last15Days => Some(15),
            MacroKind::Last30Days => Some(30),
            MacroKind::Last90Days => Some(90),
            _ => None,
        }
    }
}

impl fmt::Display for MacroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MacroKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(MacroKind::name).collect();
                anyhow!("unknown macro '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// Turns a [`MacroKind`] into a start/end pair relative to `today`.
///
/// Every resolution starts by clearing the current selection. Boundary days
/// are found by walking the cache, so each month a walk passes through gets
/// materialized, including months of the previous or next year.
#[derive(Debug, Clone, Copy)]
pub struct MacroResolver {
    today: NaiveDate,
}

impl MacroResolver {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Apply `kind` to `engine` and return the span it selected, or `None`
    /// when the selection ends up empty.
    pub fn resolve(&self, kind: MacroKind, engine: &mut RangeSelectionEngine) -> Option<DateRange> {
        engine.clear();
        log::info!("running macro {} (today = {})", kind, self.today);

        let cache = engine.cache_mut();
        let (start, end) = match kind {
            MacroKind::Clear => return None,
            MacroKind::Today => {
                let id = cache.materialize_day(self.today)?;
                engine.set_anchor(id);
                return Some(DateRange::day(self.today));
            }
            MacroKind::ThisWeek => Self::week_of(cache, self.today)?,
            MacroKind::LastWeek => {
                let a_week_ago = self.today.checked_sub_signed(Duration::days(7))?;
                Self::week_of(cache, a_week_ago)?
            }
            MacroKind::ThisMonth => {
                let key = MonthKey::containing(self.today)?;
                Self::month_bounds(cache, key, key)?
            }
            MacroKind::ThisYear => {
                let january = MonthKey::new(0, self.today.year())?;
                let december = MonthKey::new(11, self.today.year())?;
                Self::month_bounds(cache, january, december)?
            }
            MacroKind::Last15Days | MacroKind::Last30Days | MacroKind::Last90Days => {
                let days = kind.trailing_days()?;
                Self::trailing(cache, self.today, days)?
            }
        };

        if !engine.set_range(start, end) {
            return None;
        }
        engine.range()
    }

    /// Sunday..Saturday week containing `date`.
    fn week_of(cache: &mut MonthCache, date: NaiveDate) -> Option<(DayId, DayId)> {
        let day = cache.materialize_day(date)?;
        let start = Self::walk(cache, day, calendar_math::weekday_of(date), false)?;
        let end = Self::walk(cache, start, 6, true)?;
        Some((start, end))
    }

    /// First real day of `first` to the last day of `last`.
    fn month_bounds(
        cache: &mut MonthCache,
        first: MonthKey,
        last: MonthKey,
    ) -> Option<(DayId, DayId)> {
        let start = cache.materialize(first).iter().find_map(Slot::id)?;
        let end = cache.materialize(last).iter().rev().find_map(Slot::id)?;
        Some((start, end))
    }

    /// `days` calendar days ending on `today`, both ends inclusive.
    fn trailing(cache: &mut MonthCache, today: NaiveDate, days: u32) -> Option<(DayId, DayId)> {
        let end = cache.materialize_day(today)?;
        let start = Self::walk(cache, end, days.saturating_sub(1), false)?;
        Some((start, end))
    }

    fn walk(cache: &mut MonthCache, from: DayId, steps: u32, forward: bool) -> Option<DayId> {
        let mut current = from;
        for _ in 0..steps {
            current = if forward {
                cache.step_forward(current)?
            } else {
                cache.step_back(current)?
            };
        }
        Some(current)
    }
}
