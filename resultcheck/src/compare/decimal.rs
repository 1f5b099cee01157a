use super::convert_each;
use crate::error::{Blamed, FieldError};
use nom::{
    character::complete::{char, digit0},
    combinator::{all_consuming, opt},
    sequence::{pair, preceded},
    IResult,
};

/// An unsigned decimal held as an integer part and a fractional part scaled
/// to a fixed number of digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPoint {
    integer: u128,
    fraction: u128,
}

fn split_decimal(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    all_consuming(pair(digit0, opt(preceded(char('.'), digit0))))(input)
}

impl FixedPoint {
    /// Parses `input` keeping `precision` fractional digits. A digit of 5 or
    /// more right after the kept ones increments the kept fraction by one;
    /// the increment does not carry into the integer part and later digits
    /// are ignored.
    pub fn parse(input: &str, precision: u32) -> Result<Self, FieldError> {
        let invalid = || FieldError::InvalidDecimal {
            value: input.to_string(),
        };
        let overflow = || FieldError::DecimalOverflow {
            value: input.to_string(),
        };

        let (integer_digits, fraction_digits) = match split_decimal(input) {
            Ok((_, (integer_digits, fraction_digits))) => {
                (integer_digits, fraction_digits.unwrap_or(""))
            }
            Err(_) => return Err(invalid()),
        };
        if integer_digits.is_empty() && fraction_digits.is_empty() {
            return Err(invalid());
        }

        let mut integer: u128 = 0;
        for digit in integer_digits.bytes() {
            integer = push_digit(integer, digit).ok_or_else(overflow)?;
        }

        let mut fraction: u128 = 0;
        let mut places: u32 = 0;
        for digit in fraction_digits.bytes() {
            places += 1;
            if places > precision {
                if digit >= b'5' {
                    fraction = fraction.checked_add(1).ok_or_else(overflow)?;
                }
                break;
            }
            fraction = push_digit(fraction, digit).ok_or_else(overflow)?;
        }
        while places < precision {
            fraction = fraction.checked_mul(10).ok_or_else(overflow)?;
            places += 1;
        }

        Ok(Self { integer, fraction })
    }

    pub fn integer(&self) -> u128 {
        self.integer
    }

    pub fn fraction(&self) -> u128 {
        self.fraction
    }

    /// The fraction is read back as `fraction / 10^digits(fraction)`, with a
    /// zero fraction counting as one digit.
    pub fn to_f64(&self) -> f64 {
        let mut digits = 1;
        let mut rest = self.fraction / 10;
        while rest > 0 {
            digits += 1;
            rest /= 10;
        }
        self.integer as f64 + self.fraction as f64 / 10f64.powi(digits)
    }
}

fn push_digit(value: u128, digit: u8) -> Option<u128> {
    value
        .checked_mul(10)?
        .checked_add(u128::from(digit - b'0'))
}

/// `|candidate - reference| / reference * 100 < tolerance`. A zero reference
/// only matches a zero candidate.
pub fn within_tolerance(candidate: f64, reference: f64, tolerance: f64) -> bool {
    if reference == 0.0 {
        return candidate == 0.0;
    }
    (candidate - reference).abs() / reference * 100.0 < tolerance
}

pub fn compare_decimal(
    candidate: &str,
    reference: &str,
    precision: u32,
    tolerance: f64,
) -> Result<bool, Blamed> {
    let (candidate, reference) =
        convert_each(candidate, reference, |value| FixedPoint::parse(value, precision))?;
    if tolerance == 0.0 {
        Ok(candidate == reference)
    } else {
        Ok(within_tolerance(
            candidate.to_f64(),
            reference.to_f64(),
            tolerance,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use assert_matches::assert_matches;
    use float_cmp::approx_eq;

    fn parse(input: &str, precision: u32) -> (u128, u128) {
        let value = FixedPoint::parse(input, precision).unwrap();
        (value.integer(), value.fraction())
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("10.50", 2), (10, 50));
        assert_eq!(parse("10.5", 2), (10, 50));
        assert_eq!(parse("10", 2), (10, 0));
        assert_eq!(parse("10.", 2), (10, 0));
        assert_eq!(parse(".25", 2), (0, 25));
        assert_eq!(parse("0.07", 2), (0, 7));
        assert_eq!(parse("12345678901234567890", 0), (12345678901234567890, 0));
    }

    #[test]
    fn test_round_half_up_on_first_dropped_digit() {
        assert_eq!(parse("1.005", 2), (1, 1));
        assert_eq!(parse("1.004", 2), (1, 0));
        assert_eq!(parse("1.0049", 2), (1, 0));
        assert_eq!(parse("1.125", 2), (1, 13));
        assert_eq!(parse("2.5", 0), (2, 1));
        // no carry into the integer part
        assert_eq!(parse("1.995", 2), (1, 100));
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", ".", "-1.5", "1.2.3", "1,5", "1e5", " 1", "null", "+1"] {
            assert_matches!(
                FixedPoint::parse(input, 2),
                Err(FieldError::InvalidDecimal { value }) => assert_eq!(value, input)
            );
        }
    }

    #[test]
    fn test_parse_overflow() {
        assert_matches!(
            FixedPoint::parse("1000000000000000000000000000000000000000", 2),
            Err(FieldError::DecimalOverflow { .. })
        );
        assert_matches!(FixedPoint::parse("1.5", 40), Err(FieldError::DecimalOverflow { .. }));
    }

    #[test]
    fn test_largest_precision() {
        assert_eq!(parse("1.5", 38), (1, 5 * 10u128.pow(37)));
        assert_eq!(parse("0.5", 38), (0, 5 * 10u128.pow(37)));
        let nines = format!("0.{}", "9".repeat(38));
        assert_eq!(parse(&nines, 38), (0, 10u128.pow(38) - 1));
        // rounding on the 39th digit still fits
        assert_eq!(parse(&format!("{nines}5"), 38), (0, 10u128.pow(38)));
        assert_matches!(compare_decimal("1.5", "1.50", 38, 0.0), Ok(true));
    }

    #[test]
    fn test_to_f64() {
        assert!(approx_eq!(f64, FixedPoint::parse("100.0", 2).unwrap().to_f64(), 100.0, ulps = 2));
        assert!(approx_eq!(f64, FixedPoint::parse("10.25", 2).unwrap().to_f64(), 10.25, ulps = 2));
        assert!(approx_eq!(f64, FixedPoint::parse("3", 0).unwrap().to_f64(), 3.0, ulps = 2));
        // the fraction is read back by its own digit count, not the precision
        assert!(approx_eq!(f64, FixedPoint::parse("1.05", 2).unwrap().to_f64(), 1.5, ulps = 2));
    }

    #[test]
    fn test_exact_comparison() {
        assert_matches!(compare_decimal("10.50", "10.50", 2, 0.0), Ok(true));
        assert_matches!(compare_decimal("10.5", "10.50", 2, 0.0), Ok(true));
        assert_matches!(compare_decimal("10.49", "10.50", 2, 0.0), Ok(false));
        assert_matches!(compare_decimal("10.499", "10.50", 2, 0.0), Ok(true));
        assert_matches!(compare_decimal("10.494", "10.50", 2, 0.0), Ok(false));
    }

    #[test]
    fn test_tolerant_comparison() {
        assert_matches!(compare_decimal("100.0", "99.0", 2, 2.0), Ok(true));
        assert_matches!(compare_decimal("90.0", "100.0", 2, 5.0), Ok(false));
        assert_matches!(compare_decimal("95.0", "100.0", 2, 5.0), Ok(false));
        assert_matches!(compare_decimal("96.0", "100.0", 2, 5.0), Ok(true));
    }

    #[test]
    fn test_tolerance_with_zero_reference() {
        assert!(within_tolerance(0.0, 0.0, 1.0));
        assert!(!within_tolerance(0.001, 0.0, 1.0));
        assert_matches!(compare_decimal("0.00", "0", 2, 5.0), Ok(true));
        assert_matches!(compare_decimal("0.01", "0.00", 2, 5.0), Ok(false));
    }

    #[test]
    fn test_blame() {
        assert_matches!(
            compare_decimal("abc", "1.0", 2, 0.0),
            Err(Blamed { side: Side::Candidate, source: FieldError::InvalidDecimal { .. } })
        );
        assert_matches!(
            compare_decimal("1.0", "abc", 2, 0.0),
            Err(Blamed { side: Side::Reference, source: FieldError::InvalidDecimal { .. } })
        );
    }
}
