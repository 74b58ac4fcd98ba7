//! Calculator configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::tariff::{Tariff, TariffError};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Form field values, as typed by the user.
#[derive(Debug, Args)]
pub struct FormInput {
    /// Bill price
    #[arg(short, long, env = "TIP_PRICE", allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Service quality (bad, good, perfect)
    #[arg(short, long, env = "TIP_QUALITY")]
    pub quality: Option<String>,

    /// Number of customers sharing the bill
    #[arg(short, long, env = "TIP_CUSTOMERS", allow_hyphen_values = true)]
    pub customers: Option<String>,
}

/// Tip calculator configuration
#[derive(Debug, Parser)]
#[command(name = "tip-calculator", about = "Calculate a tip and rounded final price", long_about = None)]
pub struct CalculatorConfig {
    /// Form field values.
    #[command(flatten)]
    pub input: FormInput,

    /// Tariff YAML file; the built-in tariff is used if omitted
    #[arg(short, long, env = "TIP_TARIFF")]
    pub tariff: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl CalculatorConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Tariff named by the configuration, or the default tariff.
    ///
    /// # Errors
    ///
    /// Returns an error if the tariff file cannot be read or parsed.
    pub fn load_tariff(&self) -> Result<Tariff, TariffError> {
        match &self.tariff {
            Some(path) => Tariff::load(path),
            None => Ok(Tariff::default()),
        }
    }
}
