//! Quote
//!
//! A snapshot of a [`PricingEngine`] converted to money in the tariff
//! currency, ready for display.

use std::io;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{engine::PricingEngine, quality::ServiceQuality};

/// Errors that can occur when building or writing a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Amount cannot be represented in minor units of the currency.
    #[error("amount {0} cannot be represented in minor units")]
    AmountOutOfRange(Decimal),

    /// IO error writing the quote
    #[error("failed to write quote: {0}")]
    Io(#[from] io::Error),
}

/// Display snapshot of the pricing state.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote<'a> {
    price: Money<'a, Currency>,
    service_quality: ServiceQuality,
    tip_amount: Money<'a, Currency>,
    customer_count: u32,
    customer_surcharge: Money<'a, Currency>,
    final_price: Money<'a, Currency>,
}

impl Quote<'static> {
    /// Capture the engine's current inputs and outputs.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::AmountOutOfRange`] if an amount does not fit in
    /// the minor units of the tariff currency.
    pub fn from_engine(engine: &PricingEngine) -> Result<Self, QuoteError> {
        let currency = engine.tariff().currency();

        Ok(Self {
            price: to_money(Decimal::from(engine.price()), currency)?,
            service_quality: engine.service_quality(),
            tip_amount: to_money(engine.tip_amount(), currency)?,
            customer_count: engine.customer_count(),
            customer_surcharge: to_money(engine.customer_surcharge(), currency)?,
            final_price: to_money(engine.final_price(), currency)?,
        })
    }
}

impl<'a> Quote<'a> {
    /// Entered bill price
    pub fn price(&self) -> Money<'a, Currency> {
        self.price
    }

    /// Selected service quality
    pub fn service_quality(&self) -> ServiceQuality {
        self.service_quality
    }

    /// Tip on the bill price
    pub fn tip_amount(&self) -> Money<'a, Currency> {
        self.tip_amount
    }

    /// Number of customers
    pub fn customer_count(&self) -> u32 {
        self.customer_count
    }

    /// Surcharge for customers beyond the first
    pub fn customer_surcharge(&self) -> Money<'a, Currency> {
        self.customer_surcharge
    }

    /// Rounded total to pay
    pub fn final_price(&self) -> Money<'a, Currency> {
        self.final_price
    }

    /// Write the quote as a table followed by the final price.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), QuoteError> {
        let mut builder = Builder::default();

        builder.push_record(["Price".to_string(), format!("{}", self.price)]);
        builder.push_record([
            "Service quality".to_string(),
            self.service_quality.to_string(),
        ]);
        builder.push_record(["Tip".to_string(), format!("{}", self.tip_amount)]);
        builder.push_record(["Customers".to_string(), self.customer_count.to_string()]);
        builder.push_record([
            "Customer surcharge".to_string(),
            format!("{}", self.customer_surcharge),
        ]);

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..2), Alignment::right());

        writeln!(out, "\n{table}")?;
        writeln!(out, " \x1b[1mFinal price:\x1b[0m {}\n", self.final_price)?;

        Ok(())
    }
}

/// Convert a major unit amount to money, rounding half away from zero to the
/// currency's minor unit.
fn to_money(amount: Decimal, currency: &Currency) -> Result<Money<'_, Currency>, QuoteError> {
    let minor = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .ok_or(QuoteError::AmountOutOfRange(amount))?;

    Ok(Money::from_minor(minor, currency))
}
