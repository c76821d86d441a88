use crate::application::CalendarWidget;
use crate::domain::{
    CalendarGridBuilder, DateRange, DayCell, DayId, MacroKind, MacroResolver, MonthKey,
    RangeSelectionEngine, SelectionPhase, Slot,
};
use crate::infrastructure::{ControlBinding, ControlValue, HookRegistry, PickerEvent};
use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Date-range picker: the selection engine plus the month on display, the
/// host control and the host hooks.
pub struct RangePicker {
    engine: RangeSelectionEngine,
    resolver: MacroResolver,
    today: NaiveDate,
    view: MonthKey,
    control: Box<dyn ControlBinding>,
    hooks: HookRegistry,
}

impl RangePicker {
    pub fn new(
        today: NaiveDate,
        control: Box<dyn ControlBinding>,
        hooks: HookRegistry,
    ) -> Result<Self> {
        let view = MonthKey::containing(today)
            .with_context(|| format!("{} is outside the supported calendar", today))?;

        let mut picker = Self {
            engine: RangeSelectionEngine::new(),
            resolver: MacroResolver::new(today),
            today,
            view,
            control,
            hooks,
        };
        picker.patch_values();
        picker.engine.load_month(picker.view);
        Ok(picker)
    }

    /// Pre-seed the selection from the control. Unusable values are ignored.
    fn patch_values(&mut self) {
        let Some(value) = self.control.read() else {
            return;
        };
        let cache = self.engine.cache_mut();
        let Some(start) = cache.materialize_day(value.start()) else {
            return;
        };

        match value.end().and_then(|end| cache.materialize_day(end)) {
            Some(end) => {
                if !self.engine.set_range(start, end) {
                    log::warn!("control end precedes start, keeping start only");
                    self.engine.set_anchor(start);
                }
            }
            None => self.engine.set_anchor(start),
        }

        if let Some(key) = MonthKey::containing(value.start()) {
            self.view = key;
        }
        log::debug!("pre-seeded from control: {:?}", value);
    }

    pub fn engine(&self) -> &RangeSelectionEngine {
        &self.engine
    }

    pub fn phase(&self) -> SelectionPhase {
        self.engine.phase()
    }

    pub fn range(&self) -> Option<DateRange> {
        self.engine.range()
    }

    pub fn range_count(&self) -> usize {
        self.engine.range_count()
    }

    pub fn full_month(&self) -> &'static str {
        self.view.name()
    }

    pub fn year(&self) -> i32 {
        self.view.year()
    }

    pub fn select(&mut self, id: DayId) -> SelectionPhase {
        self.engine.select_day(id)
    }

    pub fn select_date(&mut self, date: NaiveDate) -> SelectionPhase {
        self.engine.select_date(date)
    }

    pub fn apply_macro(&mut self, kind: MacroKind) -> Option<DateRange> {
        self.resolver.resolve(kind, &mut self.engine)
    }

    /// Display `key`, materializing it and refreshing highlights.
    pub fn show_month(&mut self, key: MonthKey) {
        self.view = key;
        self.engine.load_month(key);
    }
}

impl CalendarWidget for RangePicker {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn view(&self) -> MonthKey {
        self.view
    }

    fn days(&self) -> Vec<Vec<Slot>> {
        self.engine
            .cache()
            .get(self.view)
            .map(CalendarGridBuilder::to_grid)
            .unwrap_or_default()
    }

    fn cell(&self, id: DayId) -> Option<&DayCell> {
        self.engine.cell(id)
    }

    fn day_id(&mut self, date: NaiveDate) -> Option<DayId> {
        self.engine.cache_mut().materialize_day(date)
    }

    fn select_day(&mut self, id: DayId) {
        self.select(id);
    }

    fn load_previous_month(&mut self) {
        if let Some(previous) = self.view.previous() {
            self.show_month(previous);
        }
    }

    fn load_next_month(&mut self) {
        if let Some(next) = self.view.next() {
            self.show_month(next);
        }
    }

    fn go_to_current_month(&mut self) {
        if let Some(current) = MonthKey::containing(self.today) {
            self.show_month(current);
        }
    }

    fn check_end_date(&self, id: DayId) -> bool {
        self.engine.is_end(id)
    }

    fn supports_macros(&self) -> bool {
        true
    }

    fn run_macro(&mut self, kind: MacroKind) {
        self.apply_macro(kind);
    }

    fn summary(&self) -> String {
        match (self.engine.start_date(), self.engine.end_date()) {
            (Some(start), Some(end)) => format!(
                "{} .. {} ({} days)",
                start.format("%b %d, %Y"),
                end.format("%b %d, %Y"),
                self.range_count()
            ),
            (Some(start), None) => format!("{} .. pick an end date", start.format("%b %d, %Y")),
            _ => "No range selected".to_string(),
        }
    }

    fn submit(&mut self) -> Result<Option<ControlValue>> {
        let (Some(start_date), Some(end_date)) = (self.engine.start_date(), self.engine.end_date())
        else {
            log::debug!("submit ignored: range incomplete");
            return Ok(None);
        };

        let value = ControlValue::Range {
            start_date,
            end_date,
        };
        self.control.write(value)?;
        self.hooks.emit(&PickerEvent::Submitted(value));
        self.close();
        Ok(Some(value))
    }

    fn close(&mut self) {
        self.hooks.emit(&PickerEvent::Closed);
    }
}
