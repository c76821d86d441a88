use crate::application::tui::{CalendarView, CalendarViewResult, Theme};
use crate::application::{CalendarWidget, Config, DatePicker, RangePicker};
use crate::infrastructure::{FileControl, HookRegistry, SimpleLoggerHook, init_file_logging};
use anyhow::Result;

/// Wires pickers to the configured control file, hooks and theme.
pub struct PickerApp {
    config: Config,
    with_plugins: bool,
}

impl PickerApp {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            with_plugins: true,
        }
    }

    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }

    pub fn without_plugins(config: Config) -> Self {
        Self {
            config,
            with_plugins: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn init_logging(&self) -> Result<()> {
        init_file_logging(&self.config.log_file, &self.config.log_filter)
    }

    fn hooks(&self) -> HookRegistry {
        let mut hooks = HookRegistry::new();
        if self.with_plugins {
            hooks.register(SimpleLoggerHook);
        }
        hooks
    }

    fn control(&self) -> Box<FileControl> {
        Box::new(FileControl::new(&self.config.state_file))
    }

    pub fn range_picker(&self) -> Result<RangePicker> {
        RangePicker::new(self.config.today, self.control(), self.hooks())
    }

    pub fn date_picker(&self) -> Result<DatePicker> {
        DatePicker::new(self.config.today, self.control(), self.hooks())
    }

    /// Run `widget` in the terminal until the user submits or closes.
    pub fn run_tui(&self, widget: &mut dyn CalendarWidget) -> Result<CalendarViewResult> {
        let theme = Theme::by_name(&self.config.theme);
        let mut view = CalendarView::new(widget, theme)?;
        view.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MacroKind, SelectionPhase};
    use crate::infrastructure::ControlBinding;
    use crate::infrastructure::test_utils::test_harness::{TestControlFile, ymd};

    fn app_in(test_file: &TestControlFile) -> PickerApp {
        let dir = test_file.dir();
        let mut config = Config::from_lookup(|key| match key {
            "RANGEPICKER_TODAY" => Some("2024-03-01".to_string()),
            _ => None,
        });
        config.state_file = dir.join("control.json");
        config.log_file = dir.join("rangepicker.log");
        PickerApp::without_plugins(config)
    }

    #[test]
    fn test_pickers_share_control_file() {
        let test_file = TestControlFile::new();
        let app = app_in(&test_file);

        let mut range = app.range_picker().unwrap();
        range.run_macro(MacroKind::Last15Days);
        range.submit().unwrap();
        assert!(test_file.control().read().is_some());

        let reopened = app.range_picker().unwrap();
        assert_eq!(reopened.phase(), SelectionPhase::RangeSet);
        assert_eq!(reopened.engine().start_date(), Some(ymd(2024, 2, 16)));

        // a stored range is not a single date
        let date = app.date_picker().unwrap();
        assert_eq!(date.date(), None);
    }
}
