use crate::application::CalendarWidget;
use crate::domain::{CalendarGridBuilder, DayCell, DayId, MonthCache, MonthKey, Slot};
use crate::infrastructure::{ControlBinding, ControlValue, HookRegistry, PickerEvent};
use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Single-date picker sharing the month cache and grid of the range picker.
pub struct DatePicker {
    cache: MonthCache,
    date: Option<DayId>,
    today: NaiveDate,
    view: MonthKey,
    control: Box<dyn ControlBinding>,
    hooks: HookRegistry,
}

impl DatePicker {
    pub fn new(
        today: NaiveDate,
        control: Box<dyn ControlBinding>,
        hooks: HookRegistry,
    ) -> Result<Self> {
        let view = MonthKey::containing(today)
            .with_context(|| format!("{} is outside the supported calendar", today))?;

        let mut picker = Self {
            cache: MonthCache::new(),
            date: None,
            today,
            view,
            control,
            hooks,
        };
        picker.patch_day();
        picker.cache.materialize(picker.view);
        Ok(picker)
    }

    fn patch_day(&mut self) {
        match self.control.read() {
            Some(ControlValue::Single(date)) => {
                if let Some(id) = self.cache.materialize_day(date) {
                    self.mark(id);
                    if let Some(key) = MonthKey::containing(date) {
                        self.view = key;
                    }
                }
            }
            Some(other) => log::warn!("date picker ignoring range control value {:?}", other),
            None => {}
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.cell(self.date?).map(DayCell::date)
    }

    /// Select only `id`, clearing the mark from every other cached day.
    fn mark(&mut self, id: DayId) {
        if self.cache.cell(id).is_none() {
            return;
        }
        for cell in self.cache.cells_mut() {
            cell.selected = cell.id() == id;
        }
        self.date = Some(id);
    }

    fn show(&mut self, key: MonthKey) {
        self.view = key;
        self.cache.materialize(key);
    }
}

impl CalendarWidget for DatePicker {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn view(&self) -> MonthKey {
        self.view
    }

    fn days(&self) -> Vec<Vec<Slot>> {
        self.cache
            .get(self.view)
            .map(CalendarGridBuilder::to_grid)
            .unwrap_or_default()
    }

    fn cell(&self, id: DayId) -> Option<&DayCell> {
        self.cache.cell(id)
    }

    fn day_id(&mut self, date: NaiveDate) -> Option<DayId> {
        self.cache.materialize_day(date)
    }

    fn select_day(&mut self, id: DayId) {
        self.mark(id);
    }

    fn load_previous_month(&mut self) {
        if let Some(previous) = self.view.previous() {
            self.show(previous);
        }
    }

    fn load_next_month(&mut self) {
        if let Some(next) = self.view.next() {
            self.show(next);
        }
    }

    fn go_to_current_month(&mut self) {
        if let Some(current) = MonthKey::containing(self.today) {
            self.show(current);
        }
    }

    fn summary(&self) -> String {
        match self.date() {
            Some(date) => date.format("%A, %B %d, %Y").to_string(),
            None => "No date selected".to_string(),
        }
    }

    fn submit(&mut self) -> Result<Option<ControlValue>> {
        let Some(date) = self.date() else {
            return Ok(None);
        };

        let value = ControlValue::Single(date);
        self.control.write(value)?;
        self.hooks.emit(&PickerEvent::Submitted(value));
        self.close();
        Ok(Some(value))
    }

    fn close(&mut self) {
        self.hooks.emit(&PickerEvent::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryControl;
    use crate::infrastructure::test_utils::test_harness::{RecordingHook, month, ymd};

    fn selected(picker: &DatePicker) -> Vec<NaiveDate> {
        picker
            .cache
            .cells()
            .filter(|c| c.selected)
            .map(DayCell::date)
            .collect()
    }

    #[test]
    fn test_selection_is_exclusive_across_months() {
        let mut picker =
            DatePicker::new(ymd(2024, 3, 13), Box::new(MemoryControl::new()), HookRegistry::new())
                .unwrap();

        let first = picker.day_id(ymd(2024, 3, 5)).unwrap();
        picker.select_day(first);
        picker.load_next_month();
        let second = picker.day_id(ymd(2024, 4, 9)).unwrap();
        picker.select_day(second);

        assert_eq!(selected(&picker), vec![ymd(2024, 4, 9)]);
        assert_eq!(picker.date(), Some(ymd(2024, 4, 9)));
    }

    #[test]
    fn test_preseeds_from_single_value() {
        let control = MemoryControl::with_value(ControlValue::Single(ymd(2023, 11, 2)));
        let picker = DatePicker::new(ymd(2024, 3, 13), Box::new(control), HookRegistry::new())
            .unwrap();

        assert_eq!(picker.view(), month(2023, 10));
        assert_eq!(picker.date(), Some(ymd(2023, 11, 2)));
    }

    #[test]
    fn test_ignores_range_value() {
        let control = MemoryControl::with_value(ControlValue::Range {
            start_date: ymd(2024, 3, 1),
            end_date: ymd(2024, 3, 5),
        });
        let picker = DatePicker::new(ymd(2024, 3, 13), Box::new(control), HookRegistry::new())
            .unwrap();
        assert_eq!(picker.date(), None);
    }

    #[test]
    fn test_submit_single_date() {
        let recorder = RecordingHook::default();
        let mut hooks = HookRegistry::new();
        hooks.register(recorder.clone());
        let mut picker =
            DatePicker::new(ymd(2024, 3, 13), Box::new(MemoryControl::new()), hooks).unwrap();

        assert_eq!(picker.submit().unwrap(), None);

        let id = picker.day_id(ymd(2024, 3, 20)).unwrap();
        picker.select_day(id);
        let value = ControlValue::Single(ymd(2024, 3, 20));
        assert_eq!(picker.submit().unwrap(), Some(value));
        assert_eq!(
            recorder.events(),
            vec![PickerEvent::Submitted(value), PickerEvent::Closed]
        );
        assert!(!picker.supports_macros());
    }
}
