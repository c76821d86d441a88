pub mod calendar_math;
pub mod date_range;
pub mod day;
pub mod grid;
pub mod macros;
pub mod month_cache;
pub mod selection;

pub use date_range::*;
pub use day::*;
pub use grid::*;
pub use macros::*;
pub use month_cache::*;
pub use selection::*;
