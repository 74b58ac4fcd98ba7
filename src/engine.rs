//! Pricing Engine
//!
//! Owns the entered bill price, service quality and customer count, and keeps
//! the tip amount and the rounded final price consistent with them. Every
//! setter validates its input first; a rejected value leaves the engine
//! untouched.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{quality::ServiceQuality, rounding::round_up_to_ten, tariff::Tariff};

/// Errors returned when an input is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Price was negative.
    #[error("price must be a non-negative integer, got {0}")]
    InvalidPrice(i64),

    /// Service quality key is not in the margin table.
    #[error("unknown service quality: {0:?}")]
    InvalidServiceQuality(String),

    /// Customer count was below one or too large to represent.
    #[error("customer count must be a positive integer, got {0}")]
    InvalidCustomerCount(i64),
}

/// Tip and final price calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingEngine {
    tariff: Tariff,
    price: u64,
    service_quality: ServiceQuality,
    customer_count: u32,
    tip_amount: Decimal,
    final_price: Decimal,
}

impl PricingEngine {
    /// Create an engine with a price of 0, the lowest service quality and one customer.
    pub fn new(tariff: Tariff) -> Self {
        let mut engine = Self {
            tariff,
            price: 0,
            service_quality: ServiceQuality::default(),
            customer_count: 1,
            tip_amount: Decimal::ZERO,
            final_price: Decimal::ZERO,
        };

        engine.recalculate_tip_amount();
        engine.recalculate_final_price();

        engine
    }

    /// Set the bill price.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidPrice`] if `value` is negative.
    pub fn set_price(&mut self, value: i64) -> Result<(), PricingError> {
        let Ok(price) = u64::try_from(value) else {
            debug!(value, "rejected price");

            return Err(PricingError::InvalidPrice(value));
        };

        self.price = price;
        self.recalculate_tip_amount();
        self.recalculate_final_price();

        Ok(())
    }

    /// Set the service quality from its key (`bad`, `good` or `perfect`).
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidServiceQuality`] if `value` is not a known key.
    pub fn set_service_quality(&mut self, value: &str) -> Result<(), PricingError> {
        let Ok(quality) = value.parse::<ServiceQuality>() else {
            debug!(value, "rejected service quality");

            return Err(PricingError::InvalidServiceQuality(value.to_string()));
        };

        self.service_quality = quality;
        self.recalculate_tip_amount();
        self.recalculate_final_price();

        Ok(())
    }

    /// Set the number of customers sharing the bill.
    ///
    /// Only the final price depends on the customer count, so the tip amount
    /// is left as it is.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidCustomerCount`] if `value` is less than one.
    pub fn set_customer_count(&mut self, value: i64) -> Result<(), PricingError> {
        let count = match u32::try_from(value) {
            Ok(count) if count >= 1 => count,
            _ => {
                debug!(value, "rejected customer count");

                return Err(PricingError::InvalidCustomerCount(value));
            }
        };

        self.customer_count = count;
        self.recalculate_final_price();

        Ok(())
    }

    /// Tariff the engine calculates with
    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Entered bill price
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Selected service quality
    pub fn service_quality(&self) -> ServiceQuality {
        self.service_quality
    }

    /// Number of customers
    pub fn customer_count(&self) -> u32 {
        self.customer_count
    }

    /// Tip on the bill price. Not rounded.
    pub fn tip_amount(&self) -> Decimal {
        self.tip_amount
    }

    /// Surcharge for every customer beyond the first.
    pub fn customer_surcharge(&self) -> Decimal {
        if self.customer_count > 1 {
            self.tariff.customer_surcharge() * Decimal::from(self.customer_count - 1)
        } else {
            Decimal::ZERO
        }
    }

    /// Price plus tip plus customer surcharge, rounded up to a multiple of ten.
    pub fn final_price(&self) -> Decimal {
        self.final_price
    }

    fn recalculate_tip_amount(&mut self) {
        let margin = self.tariff.margin(self.service_quality);

        self.tip_amount = (margin * Decimal::from(self.price)).normalize();
    }

    fn recalculate_final_price(&mut self) {
        let raw_total = Decimal::from(self.price) + self.tip_amount + self.customer_surcharge();

        self.final_price = round_up_to_ten(raw_total);

        debug!(
            price = self.price,
            service_quality = %self.service_quality,
            customer_count = self.customer_count,
            tip_amount = %self.tip_amount,
            final_price = %self.final_price,
            "recalculated final price"
        );
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(Tariff::default())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::tariff::TipMargins;

    use super::*;

    fn engine_with(price: i64, quality: &str, customers: i64) -> Result<PricingEngine, PricingError> {
        let mut engine = PricingEngine::default();

        engine.set_price(price)?;
        engine.set_service_quality(quality)?;
        engine.set_customer_count(customers)?;

        Ok(engine)
    }

    #[test]
    fn new_engine_has_defaults() {
        let engine = PricingEngine::default();

        assert_eq!(engine.price(), 0);
        assert_eq!(engine.service_quality(), ServiceQuality::Bad);
        assert_eq!(engine.customer_count(), 1);
        assert_eq!(engine.tip_amount(), Decimal::ZERO);
        assert_eq!(engine.final_price(), Decimal::ZERO);
    }

    #[test]
    fn set_price_recalculates_tip_and_final_price() -> TestResult {
        let mut engine = PricingEngine::default();

        engine.set_price(100)?;

        assert_eq!(engine.price(), 100);
        assert_eq!(engine.tip_amount(), Decimal::from(2));
        assert_eq!(engine.final_price(), Decimal::from(110));

        Ok(())
    }

    #[test]
    fn tip_amount_follows_margin_for_every_quality() -> TestResult {
        let mut engine = PricingEngine::default();
        let margins = TipMargins::default();

        for quality in ServiceQuality::ALL {
            engine.set_service_quality(quality.key())?;

            for price in [0_i64, 1, 7, 99, 100, 250, 1_234] {
                engine.set_price(price)?;

                let expected =
                    Decimal::from(price) * Decimal::from(margins.points(quality)) / Decimal::ONE_HUNDRED;

                assert_eq!(engine.tip_amount(), expected, "{quality} at {price}");
            }
        }

        Ok(())
    }

    #[test]
    fn tip_amount_is_not_rounded() -> TestResult {
        let engine = engine_with(101, "bad", 1)?;

        assert_eq!(engine.tip_amount(), Decimal::new(202, 2));
        assert_eq!(engine.final_price(), Decimal::from(110));

        Ok(())
    }

    #[test]
    fn customer_surcharge_applies_beyond_first_customer() -> TestResult {
        let mut engine = PricingEngine::default();

        for count in 1..=10 {
            engine.set_customer_count(count)?;

            let expected = Decimal::from(25 * (count - 1));

            assert_eq!(engine.customer_surcharge(), expected, "count {count}");
        }

        Ok(())
    }

    #[test]
    fn customer_count_does_not_touch_tip_amount() -> TestResult {
        let mut engine = engine_with(200, "good", 1)?;

        engine.set_customer_count(4)?;

        assert_eq!(engine.tip_amount(), Decimal::from(20));
        // 200 + 20 + 75 = 295
        assert_eq!(engine.final_price(), Decimal::from(300));

        Ok(())
    }

    #[test]
    fn rejected_price_leaves_state_unchanged() -> TestResult {
        let mut engine = engine_with(150, "perfect", 2)?;
        let before = engine.clone();

        assert_eq!(engine.set_price(-1), Err(PricingError::InvalidPrice(-1)));
        assert_eq!(engine, before);

        Ok(())
    }

    #[test]
    fn rejected_quality_leaves_state_unchanged() -> TestResult {
        let mut engine = engine_with(150, "good", 2)?;
        let before = engine.clone();

        assert_eq!(
            engine.set_service_quality("unknown"),
            Err(PricingError::InvalidServiceQuality("unknown".to_string()))
        );
        assert_eq!(engine, before);

        Ok(())
    }

    #[test]
    fn rejected_customer_count_leaves_state_unchanged() -> TestResult {
        let mut engine = engine_with(150, "good", 3)?;
        let before = engine.clone();

        for value in [0, -4, i64::from(u32::MAX) + 1] {
            assert_eq!(
                engine.set_customer_count(value),
                Err(PricingError::InvalidCustomerCount(value))
            );
            assert_eq!(engine, before);
        }

        Ok(())
    }

    #[test]
    fn zero_price_has_no_negative_zero() -> TestResult {
        let engine = engine_with(0, "bad", 1)?;

        assert_eq!(engine.tip_amount(), Decimal::ZERO);
        assert_eq!(engine.final_price(), Decimal::ZERO);
        assert_eq!(engine.final_price().to_string(), "0");

        Ok(())
    }

    #[test]
    fn uses_tariff_constants() -> TestResult {
        let tariff = Tariff::new(
            TipMargins {
                bad: 5,
                good: 20,
                perfect: 30,
            },
            10,
            rusty_money::iso::EUR,
        );
        let mut engine = PricingEngine::new(tariff);

        engine.set_price(100)?;
        engine.set_service_quality("perfect")?;
        engine.set_customer_count(3)?;

        assert_eq!(engine.tip_amount(), Decimal::from(30));
        assert_eq!(engine.customer_surcharge(), Decimal::from(20));
        assert_eq!(engine.final_price(), Decimal::from(150));

        Ok(())
    }

    #[test]
    fn large_prices_do_not_overflow() -> TestResult {
        let mut engine = PricingEngine::default();

        engine.set_price(i64::MAX)?;

        assert!(engine.final_price() > Decimal::from(i64::MAX));

        Ok(())
    }
}
