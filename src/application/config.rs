use crate::infrastructure::parse_date;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

pub struct Config {
    pub picker_dir: PathBuf,
    /// Control value persisted between runs
    pub state_file: PathBuf,
    pub log_file: PathBuf,
    /// `EnvFilter` directives for the log file
    pub log_filter: String,
    pub theme: String,
    /// Reference date for macros and the initial month
    pub today: NaiveDate,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let picker_dir = lookup("RANGEPICKER_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("rangepicker")
            });

        let state_file = picker_dir.join("control.json");
        let log_file = picker_dir.join("rangepicker.log");

        let log_filter = lookup("RANGEPICKER_LOG").unwrap_or_else(|| "info".to_string());

        let theme = lookup("RANGEPICKER_THEME").unwrap_or_else(|| "dark".to_string());

        let today = lookup("RANGEPICKER_TODAY")
            .and_then(|value| parse_date(&value))
            .unwrap_or_else(|| Local::now().date_naive());

        Self {
            picker_dir,
            state_file,
            log_file,
            log_filter,
            theme,
            today,
        }
    }
}
