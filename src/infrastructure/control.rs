use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value carried by the host's two-way bound control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Range {
        #[serde(rename = "startDate")]
        start_date: NaiveDate,
        #[serde(rename = "endDate")]
        end_date: NaiveDate,
    },
    Single(NaiveDate),
}

impl ControlValue {
    pub fn start(&self) -> NaiveDate {
        match self {
            ControlValue::Range { start_date, .. } => *start_date,
            ControlValue::Single(date) => *date,
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match self {
            ControlValue::Range { end_date, .. } => Some(*end_date),
            ControlValue::Single(_) => None,
        }
    }
}

/// Where a picker reads its initial value from and writes its result to.
pub trait ControlBinding {
    /// Current value, `None` when unset or unreadable.
    fn read(&self) -> Option<ControlValue>;
    fn write(&mut self, value: ControlValue) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryControl {
    value: Option<ControlValue>,
}

impl MemoryControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: ControlValue) -> Self {
        Self { value: Some(value) }
    }
}

impl ControlBinding for MemoryControl {
    fn read(&self) -> Option<ControlValue> {
        self.value
    }

    fn write(&mut self, value: ControlValue) -> Result<()> {
        self.value = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_utils::test_harness::ymd;

    #[test]
    fn test_serializes_host_shape() {
        let value = ControlValue::Range {
            start_date: ymd(2024, 2, 16),
            end_date: ymd(2024, 3, 1),
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"startDate":"2024-02-16","endDate":"2024-03-01"}"#);

        let single = serde_json::to_string(&ControlValue::Single(ymd(2024, 3, 1))).unwrap();
        assert_eq!(single, r#""2024-03-01""#);
    }

    #[test]
    fn test_memory_control_round_trip() {
        let mut control = MemoryControl::new();
        assert_eq!(control.read(), None);

        control.write(ControlValue::Single(ymd(2024, 3, 1))).unwrap();
        assert_eq!(control.read(), Some(ControlValue::Single(ymd(2024, 3, 1))));
        assert_eq!(control.read().unwrap().end(), None);
    }
}
