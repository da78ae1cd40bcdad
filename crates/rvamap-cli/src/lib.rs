//! Crate implementing the CLI commands.

mod cli;
mod config;
mod lookup;

pub use self::cli::CliOpts;
pub use self::config::{CONFIG_ENV, DumperConfig, LookupConfig, load_config, parse_config};
pub use self::lookup::{evaluate_lookup, write_export, write_header};
