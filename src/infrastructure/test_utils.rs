/// Test utilities shared by the unit tests
///
/// Provides date/month shorthands and a control file living in a fresh
/// temporary directory that is removed when the harness is dropped.
///
/// ```rust,ignore
/// use crate::infrastructure::test_utils::test_harness::{TestControlFile, ymd};
///
/// let mut test_file = TestControlFile::new();
/// test_file.control_mut().write(ControlValue::Single(ymd(2024, 3, 1)))?;
/// ```
#[cfg(test)]
pub mod test_harness {
    use crate::domain::MonthKey;
    use crate::infrastructure::{FileControl, PickerEvent, PickerHook};
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    /// `month` is 0-based, like [`MonthKey::new`].
    pub fn month(year: i32, month: u32) -> MonthKey {
        MonthKey::new(month, year).expect("valid test month")
    }

    pub struct TestControlFile {
        control: FileControl,
        _temp_dir: TempDir, // Keep temp dir alive
    }

    impl TestControlFile {
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp directory");
            let control = FileControl::new(temp_dir.path().join("control.json"));

            Self {
                control,
                _temp_dir: temp_dir,
            }
        }

        pub fn control(&self) -> &FileControl {
            &self.control
        }

        pub fn control_mut(&mut self) -> &mut FileControl {
            &mut self.control
        }

        /// Hand the control over to a picker, keeping the directory alive.
        pub fn into_parts(self) -> (FileControl, TempDir) {
            (self.control, self._temp_dir)
        }

        pub fn path(&self) -> &Path {
            self.control.path()
        }

        pub fn dir(&self) -> PathBuf {
            self._temp_dir.path().to_path_buf()
        }

        pub fn write_raw(&self, content: &str) {
            std::fs::write(self.path(), content).expect("Failed to write control file");
        }
    }

    /// Hook that remembers every event it receives. Clones share the log.
    #[derive(Clone, Default)]
    pub struct RecordingHook {
        events: Arc<Mutex<Vec<PickerEvent>>>,
    }

    impl RecordingHook {
        pub fn events(&self) -> Vec<PickerEvent> {
            self.events.lock().expect("poisoned").clone()
        }
    }

    impl PickerHook for RecordingHook {
        fn on_event(&self, event: &PickerEvent) -> Result<()> {
            self.events.lock().expect("poisoned").push(event.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "Recorder"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_harness::*;
    use crate::infrastructure::{ControlBinding, ControlValue};

    #[test]
    fn test_harness_isolation() {
        let mut first = TestControlFile::new();
        let second = TestControlFile::new();

        first
            .control_mut()
            .write(ControlValue::Single(ymd(2024, 3, 15)))
            .unwrap();

        assert!(first.control().read().is_some());
        assert!(second.control().read().is_none());
    }

    #[test]
    fn test_temp_dir_removed_on_drop() {
        let test_file = TestControlFile::new();
        let dir = test_file.dir();
        assert!(dir.exists());
        drop(test_file);
        assert!(!dir.exists());
    }
}
