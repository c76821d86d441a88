use crate::domain::date_range::DateRange;
use crate::domain::day::{DayCell, DayId, Slot};
use crate::domain::month_cache::{MonthCache, MonthKey};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Nothing selected
    Empty,
    /// Start chosen, end pending
    AnchorSet,
    /// Start and end chosen
    RangeSet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    start: Option<DayId>,
    end: Option<DayId>,
    range_count: usize,
}

impl SelectionState {
    pub fn start(&self) -> Option<DayId> {
        self.start
    }

    pub fn end(&self) -> Option<DayId> {
        self.end
    }

    /// 0 when empty, 1 with only a start, otherwise 2 plus the interior days.
    pub fn range_count(&self) -> usize {
        self.range_count
    }

    pub fn phase(&self) -> SelectionPhase {
        match (self.start, self.end) {
            (None, _) => SelectionPhase::Empty,
            (Some(_), None) => SelectionPhase::AnchorSet,
            (Some(_), Some(_)) => SelectionPhase::RangeSet,
        }
    }

    fn is_anchor(&self, id: DayId) -> bool {
        self.start == Some(id) || self.end == Some(id)
    }
}

/// Start/end selection state machine over a [`MonthCache`].
///
/// The engine holds only ids; dates and flags are always re-read through the
/// cache. Highlighting is maintained with two whole-cache sweeps,
/// [`clear_highlights`](Self::clear_highlights) and
/// [`recompute_range`](Self::recompute_range), run after every transition.
#[derive(Debug, Default)]
pub struct RangeSelectionEngine {
    cache: MonthCache,
    state: SelectionState,
}

impl RangeSelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &MonthCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut MonthCache {
        &mut self.cache
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn phase(&self) -> SelectionPhase {
        self.state.phase()
    }

    pub fn start(&self) -> Option<DayId> {
        self.state.start
    }

    pub fn end(&self) -> Option<DayId> {
        self.state.end
    }

    pub fn range_count(&self) -> usize {
        self.state.range_count
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.date_of(self.state.start?)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.date_of(self.state.end?)
    }

    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date()?, self.end_date()?)
    }

    pub fn is_end(&self, id: DayId) -> bool {
        self.state.end == Some(id)
    }

    pub fn cell(&self, id: DayId) -> Option<&DayCell> {
        self.cache.cell(id)
    }

    fn date_of(&self, id: DayId) -> Option<NaiveDate> {
        self.cache.cell(id).map(DayCell::date)
    }

    /// Apply a click on `id` and return the resulting phase.
    ///
    /// Rules, first match wins:
    /// 1. nothing selected: the day becomes the start
    /// 2. the day is before the start: it becomes the new start, end cleared
    /// 3. only a start: the day becomes the end (re-clicking the start is a no-op)
    /// 4. full range: the day becomes the new start, end cleared
    pub fn select_day(&mut self, id: DayId) -> SelectionPhase {
        let Some(clicked) = self.date_of(id) else {
            log::debug!("ignoring selection of unknown cell {}", id);
            return self.phase();
        };

        match self.start_date() {
            None => self.set_anchor(id),
            Some(start) if clicked < start => self.set_anchor(id),
            Some(_) if self.phase() == SelectionPhase::RangeSet => self.set_anchor(id),
            Some(_) if self.state.start == Some(id) => {
                log::debug!("{} is already the anchor", id);
            }
            Some(_) => self.set_end(id),
        }

        self.phase()
    }

    /// Materialize the cell for `date` and click it.
    pub fn select_date(&mut self, date: NaiveDate) -> SelectionPhase {
        match self.cache.materialize_day(date) {
            Some(id) => self.select_day(id),
            None => self.phase(),
        }
    }

    /// Make `id` the sole anchor, dropping any end.
    pub fn set_anchor(&mut self, id: DayId) {
        if self.cache.cell(id).is_none() {
            return;
        }
        log::debug!("anchor set to {}", id);
        self.state.start = Some(id);
        self.state.end = None;
        self.clear_highlights();
    }

    fn set_end(&mut self, id: DayId) {
        log::debug!("range end set to {}", id);
        self.state.end = Some(id);
        self.recompute_range();
    }

    /// Select `start..=end` in one step. Returns `false` (leaving the state
    /// untouched) when either id is unknown or `end` precedes `start`.
    pub fn set_range(&mut self, start: DayId, end: DayId) -> bool {
        let (Some(start_date), Some(end_date)) = (self.date_of(start), self.date_of(end)) else {
            return false;
        };
        if end_date < start_date {
            return false;
        }
        if start == end {
            self.set_anchor(start);
            return true;
        }

        self.state.start = Some(start);
        self.state.end = Some(end);
        self.recompute_range();
        true
    }

    /// Drop the whole selection.
    pub fn clear(&mut self) {
        self.state = SelectionState::default();
        self.clear_highlights();
    }

    /// Sweep every materialized cell: `selected` stays only on the anchors and
    /// `in_range` is cleared everywhere.
    pub fn clear_highlights(&mut self) {
        let state = &self.state;
        for cell in self.cache.cells_mut() {
            cell.selected = state.is_anchor(cell.id());
            cell.in_range = false;
        }

        self.state.range_count = match self.state.phase() {
            SelectionPhase::Empty => 0,
            SelectionPhase::AnchorSet => 1,
            SelectionPhase::RangeSet => 2,
        };
    }

    /// Clear, then mark every built cell strictly between start and end.
    /// The count is the calendar length of the range, so months the range
    /// spans but nobody has displayed are counted without being built.
    pub fn recompute_range(&mut self) {
        self.clear_highlights();

        let Some(range) = self.range() else {
            return;
        };

        for cell in self.cache.cells_mut() {
            if range.contains_interior(cell.date()) {
                cell.in_range = true;
            }
        }
        self.state.range_count = usize::try_from(range.len_days()).unwrap_or(0);
        log::debug!("range {} holds {} days", range, self.state.range_count);
    }

    /// Materialize `key` for display and refresh highlights.
    pub fn load_month(&mut self, key: MonthKey) -> Vec<Slot> {
        self.cache.materialize(key);
        self.recompute_range();
        self.cache.get(key).map(<[Slot]>::to_vec).unwrap_or_default()
    }
}
