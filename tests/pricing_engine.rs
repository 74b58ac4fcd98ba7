//! End-to-end pricing scenarios

use rust_decimal::Decimal;
use testresult::TestResult;

use tip_calculator::{
    engine::{PricingEngine, PricingError},
    quality::ServiceQuality,
    rounding::round_up_to_ten,
    tariff::Tariff,
};

fn quote(price: i64, quality: &str, customers: i64) -> Result<PricingEngine, PricingError> {
    let mut engine = PricingEngine::new(Tariff::default());

    engine.set_price(price)?;
    engine.set_service_quality(quality)?;
    engine.set_customer_count(customers)?;

    Ok(engine)
}

#[test]
fn bad_service_single_customer() -> TestResult {
    let engine = quote(100, "bad", 1)?;

    assert_eq!(engine.tip_amount(), Decimal::from(2));
    assert_eq!(engine.customer_surcharge(), Decimal::ZERO);
    assert_eq!(engine.final_price(), Decimal::from(110));

    Ok(())
}

#[test]
fn perfect_service_three_customers_stays_on_multiple_of_ten() -> TestResult {
    let engine = quote(200, "perfect", 3)?;

    assert_eq!(engine.tip_amount(), Decimal::from(30));
    assert_eq!(engine.customer_surcharge(), Decimal::from(50));
    assert_eq!(engine.final_price(), Decimal::from(280));

    Ok(())
}

#[test]
fn zero_price_gives_zero_final_price() -> TestResult {
    let engine = quote(0, "bad", 1)?;

    assert_eq!(engine.tip_amount(), Decimal::ZERO);
    assert_eq!(engine.final_price(), Decimal::ZERO);
    assert!(engine.final_price().is_sign_positive());

    Ok(())
}

#[test]
fn zero_price_still_pays_customer_surcharge() -> TestResult {
    let engine = quote(0, "good", 2)?;

    assert_eq!(engine.final_price(), Decimal::from(30));

    Ok(())
}

#[test]
fn setters_can_be_called_in_any_order() -> TestResult {
    let mut engine = PricingEngine::default();

    engine.set_customer_count(3)?;
    engine.set_service_quality("perfect")?;
    engine.set_price(200)?;

    assert_eq!(engine, quote(200, "perfect", 3)?);

    Ok(())
}

#[test]
fn derived_values_follow_every_successful_update() -> TestResult {
    let mut engine = quote(100, "bad", 1)?;

    engine.set_service_quality("good")?;
    assert_eq!(engine.tip_amount(), Decimal::from(10));
    assert_eq!(engine.final_price(), Decimal::from(110));

    engine.set_price(120)?;
    assert_eq!(engine.tip_amount(), Decimal::from(12));
    assert_eq!(engine.final_price(), Decimal::from(140));

    engine.set_customer_count(2)?;
    assert_eq!(engine.final_price(), Decimal::from(160));

    engine.set_customer_count(1)?;
    assert_eq!(engine.final_price(), Decimal::from(140));

    Ok(())
}

#[test]
fn final_price_matches_formula_for_all_inputs() -> TestResult {
    let mut engine = PricingEngine::default();

    for quality in ServiceQuality::ALL {
        engine.set_service_quality(quality.key())?;

        for customers in 1..=4_i64 {
            engine.set_customer_count(customers)?;

            for price in (0..=500).step_by(7) {
                engine.set_price(price)?;

                let points = Decimal::from(engine.tariff().margins().points(quality));
                let tip = Decimal::from(price) * points / Decimal::ONE_HUNDRED;
                let surcharge = Decimal::from(25 * (customers - 1));
                let expected = round_up_to_ten(Decimal::from(price) + tip + surcharge);

                assert_eq!(engine.tip_amount(), tip);
                assert_eq!(engine.final_price(), expected);
            }
        }
    }

    Ok(())
}

#[test]
fn rejected_inputs_keep_previous_results() -> TestResult {
    let mut engine = quote(200, "perfect", 3)?;

    assert!(engine.set_price(-1).is_err());
    assert!(engine.set_service_quality("unknown").is_err());
    assert!(engine.set_customer_count(0).is_err());

    assert_eq!(engine.price(), 200);
    assert_eq!(engine.service_quality(), ServiceQuality::Perfect);
    assert_eq!(engine.customer_count(), 3);
    assert_eq!(engine.tip_amount(), Decimal::from(30));
    assert_eq!(engine.final_price(), Decimal::from(280));

    Ok(())
}

#[test]
fn shipped_tariff_file_loads() -> TestResult {
    let tariff = Tariff::load("fixtures/tariffs/default.yml")?;

    assert_eq!(tariff, Tariff::default());

    Ok(())
}
