use crate::infrastructure::{ControlValue, PickerEvent, PickerHook};
use anyhow::Result;

/// Reports picker events through the `log` facade.
pub struct SimpleLoggerHook;

impl PickerHook for SimpleLoggerHook {
    fn on_event(&self, event: &PickerEvent) -> Result<()> {
        match event {
            PickerEvent::Submitted(ControlValue::Range {
                start_date,
                end_date,
            }) => log::info!("range submitted: {} .. {}", start_date, end_date),
            PickerEvent::Submitted(ControlValue::Single(date)) => {
                log::info!("date submitted: {}", date)
            }
            PickerEvent::Closed => log::info!("picker closed"),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Simple Logger"
    }
}
