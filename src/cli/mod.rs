//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod fix;

pub use args::{Cli, Commands};
