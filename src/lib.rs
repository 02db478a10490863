pub mod cli;
pub mod error;
pub mod item_sets;
pub mod report;

pub use error::{Error, Result};
