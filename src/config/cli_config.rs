use super::{DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "parts-catalog-etl")]
#[command(about = "Convert a parts-catalog text export into categorized JSON records")]
pub struct CliConfig {
    /// Catalog export to read
    #[arg(long, default_value = DEFAULT_INPUT_FILE)]
    pub input: String,

    /// File to write the records to
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    /// Directory that input and output paths are resolved against
    #[arg(long, default_value = ".")]
    pub base_dir: String,

    /// TOML file overriding the built-in classification rules
    #[arg(long)]
    pub rules: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Emit the removed bin code as a `binCode` field
    #[arg(long)]
    pub retain_bin_code: bool,

    /// Parse and summarise without writing output
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT_FILE.to_string(),
            output: DEFAULT_OUTPUT_FILE.to_string(),
            base_dir: ".".to_string(),
            rules: None,
            format: OutputFormat::Json,
            retain_bin_code: false,
            dry_run: false,
            log_format: LogFormat::Compact,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        validate_path("base_dir", &self.base_dir)?;
        validate_file_extension("output", &self.output, &[self.format.extension()])?;
        if let Some(rules) = &self.rules {
            validate_file_extension("rules", rules, &["toml"])?;
        }
        Ok(())
    }
}
