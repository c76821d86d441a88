use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Opaque identity of a materialized day cell.
///
/// Day numbers repeat every month, so selection and comparison go through
/// the id alone. Ids are handed out by the owning cache and double as the
/// index of the cell inside the cache arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayId(u32);

impl DayId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day-{}", self.0)
    }
}

/// Hands out session-unique day ids. Crate-private so that only a
/// [`MonthCache`](crate::domain::MonthCache) can mint them.
#[derive(Debug, Default)]
pub(crate) struct DayIdGenerator {
    next: u32,
}

impl DayIdGenerator {
    pub fn next_id(&mut self) -> DayId {
        let id = DayId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    id: DayId,
    date: NaiveDate,
    pub selected: bool,
    pub in_range: bool,
}

impl DayCell {
    pub fn new(id: DayId, date: NaiveDate) -> Self {
        Self {
            id,
            date,
            selected: false,
            in_range: false,
        }
    }

    pub fn id(&self) -> DayId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day_number(&self) -> String {
        self.date.day().to_string()
    }
}

/// One position in a materialized month: a leading alignment pad or a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Pad,
    Day(DayId),
}

impl Slot {
    pub fn id(&self) -> Option<DayId> {
        match self {
            Slot::Pad => None,
            Slot::Day(id) => Some(*id),
        }
    }

    pub fn is_pad(&self) -> bool {
        matches!(self, Slot::Pad)
    }
}
