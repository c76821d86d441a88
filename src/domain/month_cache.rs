use crate::domain::calendar_math::{self, FULL_MONTH};
use crate::domain::day::{DayCell, DayId, DayIdGenerator, Slot};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// Cache key for one calendar month.
///
/// Keys carry the year so that the same month of different years never
/// collide, and they order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    first: NaiveDate,
    last: NaiveDate,
}

impl MonthKey {
    /// `month` is a 0-based index (0 = January).
    pub fn new(month: u32, year: i32) -> Option<Self> {
        let first = calendar_math::first_day_of_month(year, month)?;
        let last = calendar_math::last_day_of_month(year, month)?;
        Some(Self { first, last })
    }

    pub fn containing(date: NaiveDate) -> Option<Self> {
        Self::new(date.month0(), date.year())
    }

    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn days_in_month(&self) -> u32 {
        self.last.day()
    }

    /// Number of blank slots before the 1st so that columns line up with
    /// a Sunday-first week.
    pub fn leading_pad(&self) -> u32 {
        calendar_math::weekday_of(self.first)
    }

    pub fn name(&self) -> &'static str {
        FULL_MONTH[self.month() as usize]
    }

    pub fn previous(&self) -> Option<Self> {
        Self::containing(self.first.pred_opt()?)
    }

    pub fn next(&self) -> Option<Self> {
        Self::containing(self.last.succ_opt()?)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name(), self.year())
    }
}

/// Lazily built, never evicted store of calendar months.
///
/// Every day cell lives in a single arena indexed by its [`DayId`]; a month
/// is an ordered list of slots pointing into that arena. Once a month is
/// built its slots are never rebuilt, only the cells they point at change.
#[derive(Debug, Default)]
pub struct MonthCache {
    months: BTreeMap<MonthKey, Vec<Slot>>,
    cells: Vec<DayCell>,
    ids: DayIdGenerator,
}

impl MonthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: MonthKey) -> Option<&[Slot]> {
        self.months.get(&key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: MonthKey) -> bool {
        self.months.contains_key(&key)
    }

    /// Return the slots of `key`, building the month on first access.
    pub fn materialize(&mut self, key: MonthKey) -> &[Slot] {
        if !self.months.contains_key(&key) {
            let slots = self.build_month(key);
            log::debug!("materialized {} ({} slots)", key, slots.len());
            self.months.insert(key, slots);
        }
        &self.months[&key]
    }

    fn build_month(&mut self, key: MonthKey) -> Vec<Slot> {
        let pad = key.leading_pad() as usize;
        let mut slots = Vec::with_capacity(pad + key.days_in_month() as usize);
        slots.resize(pad, Slot::Pad);

        for date in key.first_day().iter_days().take_while(|d| *d <= key.last_day()) {
            let id = self.ids.next_id();
            debug_assert_eq!(id.index(), self.cells.len());
            self.cells.push(DayCell::new(id, date));
            slots.push(Slot::Day(id));
        }

        slots
    }

    /// Materialized month keys, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.months.keys().copied()
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    pub fn cell(&self, id: DayId) -> Option<&DayCell> {
        self.cells.get(id.index())
    }

    /// Every materialized day, across all months.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut DayCell> {
        self.cells.iter_mut()
    }

    /// Look up the cell for `date` without building anything.
    pub fn day_at(&self, date: NaiveDate) -> Option<DayId> {
        let key = MonthKey::containing(date)?;
        let slots = self.get(key)?;
        let index = key.leading_pad() as usize + date.day0() as usize;
        slots.get(index)?.id()
    }

    /// Look up the cell for `date`, building its month if needed.
    pub fn materialize_day(&mut self, date: NaiveDate) -> Option<DayId> {
        let key = MonthKey::containing(date)?;
        self.materialize(key);
        self.day_at(date)
    }

    /// The day before `id`, crossing into (and building) the previous month
    /// when `id` is the 1st.
    pub fn step_back(&mut self, id: DayId) -> Option<DayId> {
        let date = self.cell(id)?.date().pred_opt()?;
        self.materialize_day(date)
    }

    /// The day after `id`, crossing into (and building) the next month when
    /// `id` is the last day.
    pub fn step_forward(&mut self, id: DayId) -> Option<DayId> {
        let date = self.cell(id)?.date().succ_opt()?;
        self.materialize_day(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::test_harness::{month, ymd};
    use std::collections::HashSet;

    #[test]
    fn test_month_key_orders_across_years() {
        let dec = month(2023, 11);
        let jan = month(2024, 0);
        assert!(dec < jan);
        assert_ne!(month(2023, 0), month(2024, 0));
        assert_eq!(jan.to_string(), "January-2024");
    }

    #[test]
    fn test_month_key_rolls_years() {
        assert_eq!(month(2024, 0).previous(), Some(month(2023, 11)));
        assert_eq!(month(2023, 11).next(), Some(month(2024, 0)));
        assert_eq!(MonthKey::new(12, 2024), None);
    }

    #[test]
    fn test_materialize_builds_padding_and_days() {
        let mut cache = MonthCache::new();
        // March 2024 starts on a Friday
        let slots = cache.materialize(month(2024, 2)).to_vec();
        assert_eq!(slots.len(), 5 + 31);
        assert!(slots[..5].iter().all(Slot::is_pad));
        assert!(slots[5..].iter().all(|s| !s.is_pad()));

        let first = cache.cell(slots[5].id().unwrap()).unwrap();
        assert_eq!(first.date(), ymd(2024, 3, 1));
        let last = cache.cell(slots[35].id().unwrap()).unwrap();
        assert_eq!(last.date(), ymd(2024, 3, 31));
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let mut cache = MonthCache::new();
        let key = month(2024, 1);

        let first_ptr = cache.materialize(key).as_ptr();
        let first_ids: Vec<_> = cache.materialize(key).iter().map(Slot::id).collect();
        let second_ptr = cache.materialize(key).as_ptr();
        let second_ids: Vec<_> = cache.get(key).unwrap().iter().map(Slot::id).collect();

        assert_eq!(first_ptr, second_ptr);
        assert_eq!(first_ids, second_ids);
        assert_eq!(cache.month_count(), 1);
        assert_eq!(cache.cells().count(), 29);
    }

    #[test]
    fn test_ids_unique_across_months() {
        let mut cache = MonthCache::new();
        for m in 0..12 {
            cache.materialize(month(2024, m));
        }
        cache.materialize(month(2025, 0));

        let ids: HashSet<_> = cache.cells().map(DayCell::id).collect();
        assert_eq!(ids.len(), 366 + 31);
    }

    #[test]
    fn test_keys_are_chronological() {
        let mut cache = MonthCache::new();
        cache.materialize(month(2024, 5));
        cache.materialize(month(2023, 11));
        cache.materialize(month(2024, 0));

        let keys: Vec<_> = cache.keys().collect();
        assert_eq!(keys, vec![month(2023, 11), month(2024, 0), month(2024, 5)]);
    }

    #[test]
    fn test_get_misses_unbuilt_month() {
        let mut cache = MonthCache::new();
        assert!(cache.get(month(2024, 0)).is_none());
        assert!(cache.day_at(ymd(2024, 1, 5)).is_none());

        let id = cache.materialize_day(ymd(2024, 1, 5)).unwrap();
        assert_eq!(cache.day_at(ymd(2024, 1, 5)), Some(id));
        assert_eq!(cache.cell(id).unwrap().date(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_step_back_crosses_year_boundary() {
        let mut cache = MonthCache::new();
        let jan_first = cache.materialize_day(ymd(2024, 1, 1)).unwrap();
        assert!(!cache.contains(month(2023, 11)));

        let dec_last = cache.step_back(jan_first).unwrap();
        assert_eq!(cache.cell(dec_last).unwrap().date(), ymd(2023, 12, 31));
        assert!(cache.contains(month(2023, 11)));

        let back = cache.step_forward(dec_last).unwrap();
        assert_eq!(back, jan_first);
    }
}
