use crate::infrastructure::ControlValue;
use anyhow::Result;

/// What a picker tells its host.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// A value was written to the control
    Submitted(ControlValue),
    /// The picker asked to be closed
    Closed,
}

/// Trait for host code that reacts to picker events
pub trait PickerHook: Send + Sync {
    fn on_event(&self, event: &PickerEvent) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// Registry for managing picker hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn PickerHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn register<H>(&mut self, hook: H)
    where
        H: PickerHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Deliver `event` to every hook. A failing hook is logged and the rest
    /// still run.
    pub fn emit(&self, event: &PickerEvent) {
        for hook in &self.hooks {
            if let Err(e) = hook.on_event(event) {
                log::warn!("hook '{}' failed: {}", hook.name(), e);
            }
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
