//! Rounding

use rust_decimal::Decimal;

/// Round an amount up to the next multiple of ten, leaving exact multiples unchanged.
///
/// `100` stays `100` while `100.5`, `101` and `109` all become `110`. A zero
/// result is always positive zero.
///
/// ```
/// use rust_decimal::Decimal;
/// use tip_calculator::rounding::round_up_to_ten;
///
/// assert_eq!(round_up_to_ten(Decimal::from(100)), Decimal::from(100));
/// assert_eq!(round_up_to_ten(Decimal::from(101)), Decimal::from(110));
/// ```
pub fn round_up_to_ten(amount: Decimal) -> Decimal {
    let rounded = (amount / Decimal::TEN).ceil() * Decimal::TEN;

    // Never hand out a negative zero for display.
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded.normalize()
    }
}
