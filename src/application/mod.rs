pub mod app;
pub mod cli;
pub mod config;
pub mod date_picker;
pub mod range_picker;
pub mod tui;
pub mod widget;

pub use app::*;
pub use cli::*;
pub use config::*;
pub use date_picker::*;
pub use range_picker::*;
pub use tui::*;
pub use widget::*;
