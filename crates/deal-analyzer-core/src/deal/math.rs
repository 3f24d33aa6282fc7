use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};

/// `numerator / denominator`, clamped to `Decimal::MAX` / `Decimal::MIN` when
/// the quotient leaves the 96-bit range. A zero denominator also clamps, so
/// callers that want zero there must check first.
pub(crate) fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(
        if numerator.is_sign_negative() != denominator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        },
    )
}

/// `part` as a 0-100 share of `whole`, or zero when `whole` is not positive.
pub(crate) fn percent_of(part: Money, whole: Money) -> Percent {
    if whole > Decimal::ZERO {
        saturating_div(part, whole).saturating_mul(dec!(100))
    } else {
        Decimal::ZERO
    }
}

/// `pct` percent of `base`.
pub(crate) fn share(base: Money, pct: Percent) -> Money {
    base.saturating_mul(pct / dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_exact() {
        assert_eq!(percent_of(dec!(31900), dec!(319000)), dec!(10));
        assert_eq!(percent_of(dec!(5), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_percent_of_huge_part_saturates() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        assert_eq!(percent_of(huge, huge), dec!(100));
        assert_eq!(percent_of(huge, dec!(0.0001)), Decimal::MAX);
        assert_eq!(percent_of(-huge, dec!(0.0001)), Decimal::MIN);
    }

    #[test]
    fn test_share_saturates() {
        assert_eq!(share(dec!(34200), dec!(8)), dec!(2736));
        assert_eq!(share(Decimal::MAX, dec!(100)), Decimal::MAX);
    }
}
