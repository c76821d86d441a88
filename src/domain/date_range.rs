use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive span of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `end` falls before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Strictly between the endpoints.
    pub fn contains_interior(&self, date: NaiveDate) -> bool {
        date > self.start && date < self.end
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::test_harness::ymd;

    #[test]
    fn test_rejects_reversed_range() {
        assert!(DateRange::new(ymd(2024, 3, 2), ymd(2024, 3, 1)).is_none());
        assert!(DateRange::new(ymd(2024, 3, 1), ymd(2024, 3, 1)).is_some());
    }

    #[test]
    fn test_interior_excludes_endpoints() {
        let range = DateRange::new(ymd(2024, 3, 1), ymd(2024, 3, 3)).unwrap();
        assert!(!range.contains_interior(ymd(2024, 3, 1)));
        assert!(range.contains_interior(ymd(2024, 3, 2)));
        assert!(!range.contains_interior(ymd(2024, 3, 3)));
    }

    #[test]
    fn test_length_counts_both_ends() {
        assert_eq!(DateRange::day(ymd(2024, 3, 1)).len_days(), 1);
        let leap = DateRange::new(ymd(2024, 2, 1), ymd(2024, 2, 29)).unwrap();
        assert_eq!(leap.len_days(), 29);
        let across = DateRange::new(ymd(2023, 12, 31), ymd(2024, 1, 6)).unwrap();
        assert_eq!(across.len_days(), 7);
    }

    #[test]
    fn test_display() {
        let range = DateRange::new(ymd(2024, 2, 16), ymd(2024, 3, 1)).unwrap();
        assert_eq!(range.to_string(), "2024-02-16 .. 2024-03-01");
    }
}
