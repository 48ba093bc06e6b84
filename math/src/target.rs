use crate::{strip_hex_prefix, CompactBits, CompactError, DecodedTarget, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Work threshold a block hash must not exceed. Smaller is harder.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target(U256);

impl Target {
    pub const fn new(value: U256) -> Self {
        Target(value)
    }

    pub fn zero() -> Self {
        Target(U256::zero())
    }

    /// Returns the inner U256 value
    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Expands compact bits, see [`CompactBits::decode`].
    pub fn from_compact(bits: CompactBits) -> DecodedTarget {
        bits.decode()
    }

    /// Canonical compact encoding, see [`CompactBits::encode`].
    pub fn to_compact(&self) -> CompactBits {
        CompactBits::encode(self)
    }

    /// Big-endian bytes, most significant first
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        bytes
    }

    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        Target(U256::from_big_endian(bytes))
    }
}

impl From<U256> for Target {
    fn from(value: U256) -> Self {
        Target(value)
    }
}

impl From<Target> for U256 {
    fn from(target: Target) -> Self {
        target.0
    }
}

impl fmt::Display for Target {
    /// 64 hex digits, big-endian
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_be_bytes()))
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self)
    }
}

impl FromStr for Target {
    type Err = CompactError;

    /// Parses up to 64 big-endian hex digits, with or without `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s.trim());
        if digits.len() > 64 {
            return Err(CompactError::TooLong { len: digits.len(), max: 64 });
        }

        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|e| CompactError::InvalidHex(format!("{}: {}", s, e)))?;
        Ok(Target::from_be_bytes(&bytes))
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Target::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POW_LIMIT_HEX: &str = "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

    #[test]
    fn test_parse_full_width() {
        let target: Target = POW_LIMIT_HEX.parse().unwrap();
        assert_eq!(target.as_u256(), U256::MAX >> 20);
        assert_eq!(target.to_string(), POW_LIMIT_HEX);
    }

    #[test]
    fn test_parse_short_and_prefixed() {
        let target: Target = "0xffff".parse().unwrap();
        assert_eq!(target.as_u256(), U256::from(0xffffu64));
        assert!("0x".parse::<Target>().unwrap().is_zero());
        assert!("xyz".parse::<Target>().is_err());
        assert!(format!("1{}", POW_LIMIT_HEX).parse::<Target>().is_err());
    }

    #[test]
    fn test_compact_of_pow_limit() {
        let target: Target = POW_LIMIT_HEX.parse().unwrap();
        let bits = target.to_compact();
        assert_eq!(bits.to_u32(), 0x1e0f_ffff);
        // Compact form truncates the low bytes
        let back = Target::from_compact(bits).into_valid().unwrap();
        assert!(back < target);
        assert_eq!(back.to_compact(), bits);
    }

    #[test]
    fn test_ordering_follows_value() {
        let easy = Target::from(U256::MAX >> 1);
        let hard = Target::from(U256::MAX >> 20);
        assert!(hard < easy);
    }

    #[test]
    fn test_serde_hex() {
        let target: Target = POW_LIMIT_HEX.parse().unwrap();
        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(json, format!("\"{}\"", POW_LIMIT_HEX));
        let back: Target = serde_json::from_str(&json).unwrap();
        assert_eq!(back, target);
    }
}
