use crate::domain::{DayCell, DayId, MacroKind, MonthKey, Slot};
use crate::infrastructure::ControlValue;
use anyhow::Result;
use chrono::NaiveDate;

/// What a front-end needs from a picker: a grid to draw, cells to style,
/// and the handful of actions a user can take.
pub trait CalendarWidget {
    fn today(&self) -> NaiveDate;

    /// Month currently on display
    fn view(&self) -> MonthKey;

    /// Week rows for the month on display
    fn days(&self) -> Vec<Vec<Slot>>;

    fn cell(&self, id: DayId) -> Option<&DayCell>;

    /// Id of the cell for `date`, building its month if needed.
    fn day_id(&mut self, date: NaiveDate) -> Option<DayId>;

    fn select_day(&mut self, id: DayId);

    fn load_previous_month(&mut self);

    fn load_next_month(&mut self);

    fn go_to_current_month(&mut self);

    fn check_end_date(&self, _id: DayId) -> bool {
        false
    }

    fn supports_macros(&self) -> bool {
        false
    }

    fn run_macro(&mut self, _kind: MacroKind) {}

    /// One-line description of the current selection
    fn summary(&self) -> String;

    /// Write the selection to the control and close. `Ok(None)` when the
    /// selection is incomplete and nothing was written.
    fn submit(&mut self) -> Result<Option<ControlValue>>;

    fn close(&mut self);

    fn title(&self) -> String {
        let view = self.view();
        format!("{} {}", view.name(), view.year())
    }
}
