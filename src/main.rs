//! Tip calculator command line
//!
//! Feeds the price, service quality and customer count given on the command
//! line through the tip form and prints the resulting quote.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use tracing::info;

use tip_calculator::{
    config::CalculatorConfig,
    engine::PricingEngine,
    form::{FormField, FormView, TipForm},
    logging,
    quote::Quote,
};

/// Terminal view: remembers the last quote and which field labels are in error.
#[derive(Debug, Default)]
struct TerminalView {
    quote: Option<Quote<'static>>,
    errors: Vec<FormField>,
}

impl FormView for TerminalView {
    fn mark_error(&mut self, field: FormField) {
        if !self.errors.contains(&field) {
            self.errors.push(field);
        }
    }

    fn clear_error(&mut self, field: FormField) {
        self.errors.retain(|errored| *errored != field);
    }

    fn render(&mut self, quote: &Quote<'static>) {
        self.quote = Some(quote.clone());
    }

    fn clear_totals(&mut self) {
        self.quote = None;
    }
}

fn main() -> Result<ExitCode> {
    let config = CalculatorConfig::load().unwrap_or_else(|error| error.exit());

    logging::init_subscriber(&config.logging)?;

    let tariff = config.load_tariff().context("failed to load tariff")?;

    info!(currency = tariff.currency().iso_alpha_code, "loaded tariff");

    let mut form = TipForm::new(PricingEngine::new(tariff), TerminalView::default())?;
    let mut stderr = io::stderr().lock();

    let fields = [
        (FormField::Price, config.input.price.as_deref()),
        (FormField::ServiceQuality, config.input.quality.as_deref()),
        (FormField::CustomerCount, config.input.customers.as_deref()),
    ];

    let mut failed = false;

    for (field, raw) in fields {
        let Some(raw) = raw else {
            continue;
        };

        let result = match field {
            FormField::Price => form.handle_price_input(raw),
            FormField::ServiceQuality => form.handle_quality_input(raw),
            FormField::CustomerCount => form.handle_customer_count_input(raw),
        };

        if let Err(error) = result {
            let label = error.field().unwrap_or(field).label_type();

            writeln!(stderr, "error [{label}]: {error}")?;
            failed = true;
        }
    }

    let (_engine, view) = form.into_parts();

    if failed || !view.errors.is_empty() {
        let labels: Vec<&str> = view.errors.iter().copied().map(FormField::label_type).collect();

        writeln!(stderr, "invalid input: {}", labels.join(", "))?;

        return Ok(ExitCode::FAILURE);
    }

    if let Some(quote) = view.quote {
        quote.write_to(io::stdout().lock())?;
    }

    Ok(ExitCode::SUCCESS)
}
