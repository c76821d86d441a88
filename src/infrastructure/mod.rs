pub mod control;
pub mod filesystem;
pub mod hooks;
pub mod logger;
pub mod parser;
pub mod plugins;

#[cfg(test)]
pub mod test_utils;

pub use control::*;
pub use filesystem::*;
pub use hooks::*;
pub use logger::*;
pub use parser::*;
pub use plugins::*;
