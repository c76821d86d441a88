use crate::infrastructure::{ControlBinding, ControlParser, ControlValue};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Control persisted as a small JSON file, so a value picked in one run is
/// the pre-seed of the next.
pub struct FileControl {
    path: PathBuf,
    parser: ControlParser,
}

impl FileControl {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            parser: ControlParser::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ControlBinding for FileControl {
    fn read(&self) -> Option<ControlValue> {
        if !self.path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("could not read {}: {}", self.path.display(), e);
                return None;
            }
        };

        let value = self.parser.parse(&content);
        if value.is_none() {
            log::warn!("ignoring malformed control value in {}", self.path.display());
        }
        value
    }

    fn write(&mut self, value: ControlValue) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create control directory {}", parent.display())
            })?;
        }

        let content = self.parser.serialize(&value)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write control file {}", self.path.display()))?;

        log::debug!("control written to {}", self.path.display());
        Ok(())
    }
}
