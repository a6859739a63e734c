//! Command-line interface: argument parsing and subcommand handlers.

pub mod args;
pub mod commands;
pub mod enums;

pub use args::{Args, Command, ConfigAction};
pub use enums::OutputFormat;
