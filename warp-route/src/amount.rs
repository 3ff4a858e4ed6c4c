//! Parsing and serde helpers for 256-bit token amounts.
//!
//! Token supplies and transfer amounts routinely exceed `u64`, so config
//! files may carry them as JSON numbers (small values) or as strings in
//! decimal or `0x`-prefixed hexadecimal form. Amounts are always written back
//! as decimal strings.

use alloy_primitives::U256;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Error returned when a string is not a valid unsigned 256-bit amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid token amount `{0}`")]
pub struct AmountParseError(String);

/// Parses a decimal or `0x`-prefixed hexadecimal amount.
///
/// Underscores are accepted as digit separators (`1_000_000`).
///
/// # Errors
///
/// Returns [`AmountParseError`] for empty, negative, fractional or
/// overflowing input.
pub fn parse_u256(input: &str) -> Result<U256, AmountParseError> {
    let trimmed = input.trim();
    let digits: String = trimmed.chars().filter(|c| *c != '_').collect();
    let (body, radix) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (digits.as_str(), 10),
    };
    if body.is_empty() {
        return Err(AmountParseError(input.to_owned()));
    }
    U256::from_str_radix(body, radix).map_err(|_| AmountParseError(input.to_owned()))
}

struct U256Visitor;

impl Visitor<'_> for U256Visitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer or a decimal/hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(U256::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(U256::from)
            .map_err(|_| E::custom(format!("negative token amount {v}")))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(U256::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_u256(v).map_err(E::custom)
    }
}

/// Serde adapter for a required [`U256`] field.
pub mod u256 {
    use super::{Deserializer, Serializer, U256, U256Visitor};

    /// Serializes the amount as a decimal string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserializes a number or decimal/hex string.
    ///
    /// # Errors
    ///
    /// Fails on malformed or negative input.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        deserializer.deserialize_any(U256Visitor)
    }
}

/// Serde adapter for an optional [`U256`] field.
///
/// Use together with `#[serde(default)]` so a missing field reads as `None`.
pub mod option_u256 {
    use super::{Deserializer, Serializer, U256, U256Visitor};
    use serde::Deserialize;

    /// Serializes `Some` as a decimal string and `None` as null.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<U256>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes null, a number, or a decimal/hex string.
    ///
    /// # Errors
    ///
    /// Fails on malformed or negative input.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::u256")] U256);

        Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(v)| v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Supply {
        #[serde(with = "u256")]
        total: U256,
        #[serde(default, with = "option_u256")]
        cap: Option<U256>,
    }

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!(parse_u256("1000").unwrap(), U256::from(1000));
        assert_eq!(parse_u256("0x3e8").unwrap(), U256::from(1000));
        assert_eq!(parse_u256("1_000").unwrap(), U256::from(1000));
        assert_eq!(parse_u256("0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_u256("").is_err());
        assert!(parse_u256("-1").is_err());
        assert!(parse_u256("1.5").is_err());
        assert!(parse_u256("0x").is_err());
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let s: Supply = serde_json::from_str(r#"{"total": 1000}"#).unwrap();
        assert_eq!(s.total, U256::from(1000));
        assert_eq!(s.cap, None);

        let s: Supply =
            serde_json::from_str(r#"{"total": "1000000000000000000000000", "cap": "0x10"}"#)
                .unwrap();
        assert_eq!(s.total, U256::from(10u128.pow(24)));
        assert_eq!(s.cap, Some(U256::from(16)));
    }

    #[test]
    fn test_deserialize_zero_is_present() {
        let s: Supply = serde_json::from_str(r#"{"total": 0, "cap": 0}"#).unwrap();
        assert_eq!(s.cap, Some(U256::ZERO));
    }

    #[test]
    fn test_serialize_as_decimal_string() {
        let s = Supply {
            total: U256::from(42),
            cap: None,
        };
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"{"total":"42","cap":null}"#
        );
    }

    #[test]
    fn test_negative_number_rejected() {
        let result: Result<Supply, _> = serde_json::from_str(r#"{"total": -5}"#);
        assert!(result.is_err());
    }
}
