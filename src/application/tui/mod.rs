pub mod calendar_view;
pub mod text;
pub mod theme;

pub use calendar_view::*;
pub use text::*;
pub use theme::*;
