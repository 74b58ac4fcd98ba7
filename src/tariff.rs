//! Tariff
//!
//! The fixed configuration a tip is calculated against: tip margins per
//! service quality, the per-customer surcharge and the display currency.

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Findable, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::quality::ServiceQuality;

/// Tariff loading errors
#[derive(Debug, Error)]
pub enum TariffError {
    /// IO error reading the tariff file
    #[error("Failed to read tariff file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Tip margin per service quality, in whole percent points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TipMargins {
    /// Margin for [`ServiceQuality::Bad`]
    pub bad: u32,

    /// Margin for [`ServiceQuality::Good`]
    pub good: u32,

    /// Margin for [`ServiceQuality::Perfect`]
    pub perfect: u32,
}

impl TipMargins {
    /// Percent points for the given quality.
    pub const fn points(&self, quality: ServiceQuality) -> u32 {
        match quality {
            ServiceQuality::Bad => self.bad,
            ServiceQuality::Good => self.good,
            ServiceQuality::Perfect => self.perfect,
        }
    }

    /// Margin for the given quality as a fraction of the price.
    pub fn margin(&self, quality: ServiceQuality) -> Percentage {
        Percentage::from(Decimal::new(i64::from(self.points(quality)), 2))
    }
}

impl Default for TipMargins {
    fn default() -> Self {
        Self {
            bad: 2,
            good: 10,
            perfect: 15,
        }
    }
}

/// Tariff as written in YAML
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TariffFixture {
    /// ISO 4217 currency code, e.g. `CZK`
    currency: String,

    /// Flat amount per customer beyond the first, in major units
    customer_surcharge: u32,

    /// Tip margins per quality
    margins: TipMargins,
}

/// Pricing constants a [`PricingEngine`](crate::engine::PricingEngine) calculates with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tariff {
    margins: TipMargins,
    customer_surcharge: Decimal,
    currency: &'static Currency,
}

impl Tariff {
    /// Default surcharge per extra customer.
    pub const DEFAULT_CUSTOMER_SURCHARGE: u32 = 25;

    /// Create a tariff from its parts.
    pub fn new(margins: TipMargins, customer_surcharge: u32, currency: &'static Currency) -> Self {
        Self {
            margins,
            customer_surcharge: Decimal::from(customer_surcharge),
            currency,
        }
    }

    /// Parse a tariff from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, has missing or unknown
    /// fields, or names an unknown currency.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TariffError> {
        let fixture: TariffFixture = serde_norway::from_str(yaml)?;

        let currency = Currency::find(&fixture.currency)
            .ok_or_else(|| TariffError::UnknownCurrency(fixture.currency.clone()))?;

        Ok(Self::new(
            fixture.margins,
            fixture.customer_surcharge,
            currency,
        ))
    }

    /// Load a tariff from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TariffError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Tip margins per quality
    pub fn margins(&self) -> &TipMargins {
        &self.margins
    }

    /// Tip margin for a quality
    pub fn margin(&self, quality: ServiceQuality) -> Percentage {
        self.margins.margin(quality)
    }

    /// Surcharge per customer beyond the first
    pub fn customer_surcharge(&self) -> Decimal {
        self.customer_surcharge
    }

    /// Currency amounts are displayed in
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self::new(
            TipMargins::default(),
            Self::DEFAULT_CUSTOMER_SURCHARGE,
            rusty_money::iso::CZK,
        )
    }
}
