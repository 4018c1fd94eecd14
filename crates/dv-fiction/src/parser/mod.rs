//! Command parsing and item name resolution.

mod command;
mod resolver;

pub use command::{Command, parse_command};
pub use resolver::{resolve_name, resolve_names, suggest_names};
