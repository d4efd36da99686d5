use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A non-negative amount of money with two fractional digits.
///
/// Stored as whole minor units (cents) so that arithmetic and comparisons
/// are exact. The amount never exceeds [`Price::MAX`], the largest value the
/// store's integer column can hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Price(i64);

impl Price {
    pub const ZERO: Self = Self(0);

    /// `i64::MAX` cents.
    pub const MAX: Self = Self(i64::MAX);

    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(i64::from(cents))
    }

    /// A price of `cents`, rejecting amounts above [`Price::MAX`].
    pub fn try_from_cents(cents: u64) -> Result<Self, PriceError> {
        i64::try_from(cents)
            .map(Self)
            .map_err(|_| PriceError::TooLarge(cents.to_string()))
    }

    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0.unsigned_abs()
    }

    /// Cents as stored.
    pub(crate) const fn as_i64(self) -> i64 {
        self.0
    }
}

impl TryFrom<u64> for Price {
    type Error = PriceError;

    fn try_from(cents: u64) -> Result<Self, Self::Error> {
        Self::try_from_cents(cents)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.cents()
    }
}

/// Errors produced when parsing a [`Price`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price must not be empty")]
    Empty,

    #[error("price must not be negative: {0}")]
    Negative(String),

    #[error("price has more than two decimals: {0}")]
    TooPrecise(String),

    #[error("price is too large: {0}")]
    TooLarge(String),

    #[error("invalid price: {0}")]
    Invalid(String),
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(PriceError::Negative(trimmed.to_string()));
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if fraction.len() > 2 {
            return Err(PriceError::TooPrecise(trimmed.to_string()));
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(PriceError::Invalid(trimmed.to_string()));
        }

        let too_large = || PriceError::TooLarge(trimmed.to_string());
        let whole: u64 = whole.parse().map_err(|_| too_large())?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| PriceError::Invalid(trimmed.to_string()))? * 10,
            _ => fraction
                .parse()
                .map_err(|_| PriceError::Invalid(trimmed.to_string()))?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .ok_or_else(too_large)?;
        Self::try_from_cents(cents).map_err(|_| too_large())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fraction() {
        assert_eq!("123.45".parse::<Price>().unwrap(), Price::from_cents(12_345));
        assert_eq!("111".parse::<Price>().unwrap(), Price::from_cents(11_100));
        assert_eq!("9.5".parse::<Price>().unwrap(), Price::from_cents(950));
        assert_eq!(" 0.07 ".parse::<Price>().unwrap(), Price::from_cents(7));
    }

    #[test]
    fn test_parse_rejects_negative_and_garbage() {
        assert!(matches!("-1".parse::<Price>(), Err(PriceError::Negative(_))));
        assert!(matches!("".parse::<Price>(), Err(PriceError::Empty)));
        assert!(matches!("1.234".parse::<Price>(), Err(PriceError::TooPrecise(_))));
        assert!(matches!("12a".parse::<Price>(), Err(PriceError::Invalid(_))));
        assert!(matches!(".50".parse::<Price>(), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Price::from_cents(12_345).to_string(), "123.45");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_price_is_capped_at_max() {
        assert_eq!(
            "92233720368547758.07".parse::<Price>().unwrap(),
            Price::MAX
        );
        assert!(matches!(
            "92233720368547758.08".parse::<Price>(),
            Err(PriceError::TooLarge(_))
        ));
        assert!(matches!(
            "100000000000000000.00".parse::<Price>(),
            Err(PriceError::TooLarge(_))
        ));
        assert!(matches!(
            "999999999999999999999".parse::<Price>(),
            Err(PriceError::TooLarge(_))
        ));

        assert_eq!(Price::try_from_cents(Price::MAX.cents()), Ok(Price::MAX));
        assert!(Price::try_from_cents(Price::MAX.cents() + 1).is_err());
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let max: Price = serde_json::from_str("9223372036854775807").unwrap();
        assert_eq!(max, Price::MAX);
        assert!(serde_json::from_str::<Price>("9223372036854775808").is_err());
        assert_eq!(serde_json::to_string(&Price::from_cents(1_999)).unwrap(), "1999");
    }
}
