//! Tip Form
//!
//! Adapter between raw form field text and the [`PricingEngine`]. The form
//! parses what the user typed, skips input that would not change anything,
//! and tells its [`FormView`] which fields are in error and what to render.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::{
    engine::{PricingEngine, PricingError},
    quote::{Quote, QuoteError},
};

/// Errors raised while handling form input.
#[derive(Debug, Error)]
pub enum FormError {
    /// Field text does not start with an integer.
    #[error("{field} is not an integer: {raw:?}")]
    NotAnInteger {
        /// Field the text was entered into
        field: FormField,

        /// Text as entered
        raw: String,
    },

    /// The engine rejected the parsed value.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The quote could not be built for rendering.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

impl FormError {
    /// Field the error belongs to, if any.
    ///
    /// Quote errors are not tied to a field; the caller knows which input
    /// triggered the render.
    pub fn field(&self) -> Option<FormField> {
        match self {
            FormError::NotAnInteger { field, .. } => Some(*field),
            FormError::Pricing(PricingError::InvalidPrice(_)) => Some(FormField::Price),
            FormError::Pricing(PricingError::InvalidServiceQuality(_)) => {
                Some(FormField::ServiceQuality)
            }
            FormError::Pricing(PricingError::InvalidCustomerCount(_)) => {
                Some(FormField::CustomerCount)
            }
            FormError::Quote(_) => None,
        }
    }
}

/// Input fields of the tip form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Bill price
    Price,

    /// Service quality select
    ServiceQuality,

    /// Number of customers
    CustomerCount,
}

impl FormField {
    /// Label key identifying the field's container in the view.
    pub const fn label_type(self) -> &'static str {
        match self {
            FormField::Price => "price",
            FormField::ServiceQuality => "serv_quality",
            FormField::CustomerCount => "cust_count",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormField::Price => "price",
            FormField::ServiceQuality => "service quality",
            FormField::CustomerCount => "customer count",
        })
    }
}

/// Presentation side of the form.
pub trait FormView {
    /// Flag a field as holding invalid input.
    fn mark_error(&mut self, field: FormField);

    /// Remove the error flag from a field.
    fn clear_error(&mut self, field: FormField);

    /// Show the current quote.
    fn render(&mut self, quote: &Quote<'static>);

    /// Blank out displayed totals that no longer match valid input.
    fn clear_totals(&mut self);
}

/// Tip form state: the engine plus the view it renders to.
#[derive(Debug)]
pub struct TipForm<V: FormView> {
    engine: PricingEngine,
    view: V,
    stale: bool,
}

impl<V: FormView> TipForm<V> {
    /// Create a form around an engine and render its initial quote.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Quote`] if the initial quote cannot be built.
    pub fn new(engine: PricingEngine, view: V) -> Result<Self, FormError> {
        let mut form = Self {
            engine,
            view,
            stale: false,
        };

        form.render()?;

        Ok(form)
    }

    /// Handle text typed into the price field.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not an integer, the price is rejected or
    /// the resulting quote cannot be built.
    pub fn handle_price_input(&mut self, raw: &str) -> Result<(), FormError> {
        let current = i64::try_from(self.engine.price()).ok();

        self.handle_integer(FormField::Price, raw, current, PricingEngine::set_price)
    }

    /// Handle a value chosen in the service quality field.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a known service quality.
    pub fn handle_quality_input(&mut self, raw: &str) -> Result<(), FormError> {
        self.view.clear_error(FormField::ServiceQuality);

        let result = self.engine.set_service_quality(raw);

        self.apply(FormField::ServiceQuality, result.map_err(FormError::from))
    }

    /// Handle text typed into the customer count field.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not an integer, the count is rejected or
    /// the resulting quote cannot be built.
    pub fn handle_customer_count_input(&mut self, raw: &str) -> Result<(), FormError> {
        let current = Some(i64::from(self.engine.customer_count()));

        self.handle_integer(
            FormField::CustomerCount,
            raw,
            current,
            PricingEngine::set_customer_count,
        )
    }

    /// Engine behind the form
    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// View the form renders to
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Consume the form, returning the engine and view.
    pub fn into_parts(self) -> (PricingEngine, V) {
        (self.engine, self.view)
    }

    fn handle_integer(
        &mut self,
        field: FormField,
        raw: &str,
        current: Option<i64>,
        set: impl FnOnce(&mut PricingEngine, i64) -> Result<(), PricingError>,
    ) -> Result<(), FormError> {
        self.view.clear_error(field);

        let Some(value) = parse_leading_int(raw) else {
            return self.apply(
                field,
                Err(FormError::NotAnInteger {
                    field,
                    raw: raw.to_string(),
                }),
            );
        };

        if !self.stale && current == Some(value) {
            debug!(%field, value, "input unchanged");

            return Ok(());
        }

        let result = set(&mut self.engine, value);

        self.apply(field, result.map_err(FormError::from))
    }

    /// Render after an accepted value, or flag the field and blank the totals.
    ///
    /// A quote that cannot be built counts as a failure of the field that
    /// produced it: the view must not keep showing totals for older input.
    fn apply(&mut self, field: FormField, result: Result<(), FormError>) -> Result<(), FormError> {
        if let Err(error) = result.and_then(|()| self.render()) {
            debug!(%field, %error, "input rejected");

            self.view.mark_error(field);
            self.view.clear_totals();
            self.stale = true;

            return Err(error);
        }

        Ok(())
    }

    fn render(&mut self) -> Result<(), FormError> {
        let quote = Quote::from_engine(&self.engine)?;

        self.view.render(&quote);
        self.stale = false;

        Ok(())
    }
}

/// Parse the integer at the start of `raw`.
///
/// Leading whitespace and a single sign are accepted, and parsing stops at
/// the first character that is not a digit, so `" 12abc"` is `12` and `"3.7"`
/// is `3`. Returns `None` if no digits are found or the value overflows.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_len = unsigned
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = unsigned.get(..digits_len).filter(|digits| !digits.is_empty())?;

    if negative {
        format!("-{digits}").parse().ok()
    } else {
        digits.parse().ok()
    }
}
