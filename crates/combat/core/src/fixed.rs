//! 64.64 fixed-point values and their exact conversion to `f64`.
//!
//! Settlement constants are stored as unsigned integers whose real value is
//! `raw / 2^64`. Those integers are far beyond the 53-bit mantissa of an
//! `f64`, so converting them first and dividing afterwards drifts from the
//! contract. All conversion therefore goes through [`divide_with_precision`]:
//! integer division first, float conversion last.

use core::fmt;
use core::str::FromStr;

use crate::error::{EngineError, ErrorSeverity};

/// Decimal digits kept by the integer division before rounding.
pub const DEFAULT_DECIMAL_PLACES: u32 = 5;

/// Decimal digits retained in the final `f64`.
pub const DEFAULT_ROUND_TO: u32 = 2;

/// Errors raised while converting fixed-point values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixedPointError {
    /// Denominator was zero.
    #[error("fixed-point division by zero")]
    DivisionByZero,

    /// Scaling the numerator by `10^decimal_places` does not fit in 128 bits.
    #[error("numerator {numerator} cannot be scaled by 10^{decimal_places} without overflow")]
    Overflow { numerator: u128, decimal_places: u32 },

    /// Text was not a non-negative base-10 integer.
    #[error("'{0}' is not a valid fixed-point integer")]
    Malformed(String),
}

impl EngineError for FixedPointError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DivisionByZero | Self::Malformed(_) => ErrorSeverity::Validation,
            Self::Overflow { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "FIXED_DIVISION_BY_ZERO",
            Self::Overflow { .. } => "FIXED_OVERFLOW",
            Self::Malformed(_) => "FIXED_MALFORMED",
        }
    }
}

/// Divide two large integers and return the quotient as an `f64`.
///
/// # Algorithm
///
/// ```text
/// quotient = (numerator * 10^decimal_places) / denominator   (truncating)
/// value    = parse("<integer part>.<fraction part>")
/// result   = value rounded to round_to digits
/// ```
///
/// The division never leaves integer space. Rounding applies to the parsed
/// `f64`, so a decimal tie such as `1.005` rounds by the nearest double
/// (`1.00499...`) and lands on `1.0`.
///
/// # Errors
///
/// Returns [`FixedPointError::DivisionByZero`] for a zero denominator and
/// [`FixedPointError::Overflow`] when the scaled numerator exceeds `u128`.
pub fn divide_with_precision(
    numerator: u128,
    denominator: u128,
    decimal_places: u32,
    round_to: u32,
) -> Result<f64, FixedPointError> {
    if denominator == 0 {
        return Err(FixedPointError::DivisionByZero);
    }

    let overflow = || FixedPointError::Overflow {
        numerator,
        decimal_places,
    };

    let scale = 10u128.checked_pow(decimal_places).ok_or_else(overflow)?;
    let quotient = numerator.checked_mul(scale).ok_or_else(overflow)? / denominator;

    let value = parse_decimal(insert_decimal_point(quotient, decimal_places))?;
    parse_decimal(format!("{value:.prec$}", prec = round_to as usize))
}

fn parse_decimal(text: String) -> Result<f64, FixedPointError> {
    text.parse::<f64>()
        .map_err(|_| FixedPointError::Malformed(text))
}

/// Render `value / 10^places` as a decimal string without touching floats.
fn insert_decimal_point(value: u128, places: u32) -> String {
    if places == 0 {
        return value.to_string();
    }

    let places = places as usize;
    let padded = format!("{value:0>width$}", width = places + 1);
    let (integer, fraction) = padded.split_at(padded.len() - places);
    format!("{integer}.{fraction}")
}

/// Unsigned 64.64 fixed-point number, stored as its raw integer.
///
/// Ordering and equality compare raw values, which matches the ordering of
/// the real numbers they encode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed64(u128);

impl Fixed64 {
    pub const FRACTIONAL_BITS: u32 = 64;
    /// `2^64`, the raw encoding of 1.0.
    pub const SCALE: u128 = 1 << Self::FRACTIONAL_BITS;

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(Self::SCALE);

    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Encode a whole number. Every `u64` fits exactly.
    pub const fn from_int(value: u64) -> Self {
        Self((value as u128) << Self::FRACTIONAL_BITS)
    }

    pub const fn raw(self) -> u128 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert with the default precision (5 working digits, 2 kept).
    pub fn to_f64(self) -> Result<f64, FixedPointError> {
        self.to_f64_with(DEFAULT_DECIMAL_PLACES, DEFAULT_ROUND_TO)
    }

    pub fn to_f64_with(self, decimal_places: u32, round_to: u32) -> Result<f64, FixedPointError> {
        divide_with_precision(self.0, Self::SCALE, decimal_places, round_to)
    }
}

impl fmt::Display for Fixed64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fixed64 {
    type Err = FixedPointError;

    /// Parse a raw integer, allowing `_` digit separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.trim().chars().filter(|c| *c != '_').collect();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FixedPointError::Malformed(s.to_string()));
        }
        digits
            .parse::<u128>()
            .map(Self)
            .map_err(|_| FixedPointError::Malformed(s.to_string()))
    }
}

impl From<u128> for Fixed64 {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

// Raw values exceed the 64-bit integer range of TOML, so they travel as
// decimal strings. Plain integers are accepted on input when they fit.
#[cfg(feature = "serde")]
impl serde::Serialize for Fixed64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fixed64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RawVisitor;

        impl serde::de::Visitor<'_> for RawVisitor {
            type Value = Fixed64;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative 64.64 fixed-point integer or decimal string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Fixed64, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Fixed64, E> {
                Ok(Fixed64(v as u128))
            }

            fn visit_u128<E: serde::de::Error>(self, v: u128) -> Result<Fixed64, E> {
                Ok(Fixed64(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Fixed64, E> {
                u128::try_from(v)
                    .map(Fixed64)
                    .map_err(|_| E::custom(format!("fixed-point value {v} is negative")))
            }
        }

        deserializer.deserialize_any(RawVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiples_of_scale_convert_exactly() {
        let five = 5u128 * Fixed64::SCALE;
        assert_eq!(divide_with_precision(five, Fixed64::SCALE, 5, 2), Ok(5.0));
        assert_eq!(Fixed64::from_int(100_000).to_f64(), Ok(100_000.0));
    }

    #[test]
    fn rounds_on_truncated_decimal() {
        // 1/3 -> 0.33333 -> 0.33
        assert_eq!(divide_with_precision(1, 3, 5, 2), Ok(0.33));
        // 2/3 -> 0.66666 -> 0.67
        assert_eq!(divide_with_precision(2, 3, 5, 2), Ok(0.67));
        // truncation happens before rounding: 0.999999 -> 0.99999 -> 1.0
        assert_eq!(divide_with_precision(999_999, 1_000_000, 5, 2), Ok(1.0));
    }

    #[test]
    fn decimal_ties_round_as_the_parsed_double() {
        // "1.00500" parses to 1.00499999..., which rounds down
        assert_eq!(divide_with_precision(100_500, 100_000, 5, 2), Ok(1.0));
        let expected: f64 = format!("{:.2}", "1.00500".parse::<f64>().unwrap())
            .parse()
            .unwrap();
        assert_eq!(
            divide_with_precision(100_500, 100_000, 5, 2).map(f64::to_bits),
            Ok(expected.to_bits())
        );
    }

    #[test]
    fn pads_small_quotients_with_leading_zeros() {
        assert_eq!(divide_with_precision(1, 100_000, 5, 5), Ok(0.00001));
        assert_eq!(divide_with_precision(7, 1_000, 5, 3), Ok(0.007));
    }

    #[test]
    fn round_to_beyond_working_digits_keeps_all_digits() {
        assert_eq!(divide_with_precision(1, 3, 2, 6), Ok(0.33));
        assert_eq!(divide_with_precision(10, 4, 0, 0), Ok(2.0));
    }

    #[test]
    fn zero_denominator_is_an_error() {
        assert_eq!(
            divide_with_precision(1, 0, 5, 2),
            Err(FixedPointError::DivisionByZero)
        );
    }

    #[test]
    fn scaling_overflow_is_reported() {
        let err = divide_with_precision(u128::MAX, 1, 5, 2).unwrap_err();
        assert_eq!(err.error_code(), "FIXED_OVERFLOW");
        assert_eq!(err.severity(), ErrorSeverity::Internal);
    }

    #[test]
    fn fractional_constants_survive_conversion() {
        // floor(0.12 * 2^64)
        assert_eq!(Fixed64::from_raw(2_213_609_288_845_146_193).to_f64(), Ok(0.12));
        // 0.25 * 2^64
        assert_eq!(Fixed64::from_raw(4_611_686_018_427_387_904).to_f64(), Ok(0.25));
    }

    #[test]
    fn parses_raw_integers_with_separators() {
        assert_eq!("18_446_744_073_709_551_616".parse(), Ok(Fixed64::ONE));
        assert!("-1".parse::<Fixed64>().is_err());
        assert!("1.5".parse::<Fixed64>().is_err());
        assert!("".parse::<Fixed64>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_decimal_strings() {
        let json = serde_json::to_string(&Fixed64::ONE).unwrap();
        assert_eq!(json, "\"18446744073709551616\"");
        let back: Fixed64 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Fixed64::ONE);
        let small: Fixed64 = serde_json::from_str("42").unwrap();
        assert_eq!(small.raw(), 42);
    }
}
