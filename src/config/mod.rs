pub mod cli;
#[cfg(feature = "cli")]
pub mod cli_config;
pub mod rules;

#[cfg(feature = "cli")]
pub use cli_config::{CliConfig, LogFormat};

pub const DEFAULT_INPUT_FILE: &str = "Part-Numbers.csv";
pub const DEFAULT_OUTPUT_FILE: &str = "parts.json";
