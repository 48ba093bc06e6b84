use crate::errors::HashError;
use borsh_derive::{BorshDeserialize, BorshSerialize};
use lux_math::{strip_hex_prefix, U256};
use std::cmp::Ordering;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const HASH_SIZE: usize = 32;

/// A 32-byte block hash.
///
/// Bytes are kept in little-endian order, so the numeric value compared
/// against a target is `U256::from_little_endian(bytes)`. The textual form
/// is the usual reversed (big-endian) hex. Ordering follows that numeric
/// value, not the byte order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns raw bytes
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub const fn zeroed() -> Self {
        Self([0u8; HASH_SIZE])
    }

    /// Constructs a hash from four little-endian u64s (used in tests)
    pub const fn from_le_u64(parts: [u64; 4]) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        let mut i = 0;
        while i < 4 {
            let le = parts[i].to_le_bytes();
            let mut j = 0;
            while j < 8 {
                bytes[i * 8 + j] = le[j];
                j += 1;
            }
            i += 1;
        }
        Self(bytes)
    }

    /// Creates a hash from a single u64 word
    pub const fn from_u64_word(word: u64) -> Self {
        Self::from_le_u64([word, 0, 0, 0])
    }

    /// Numeric value of the hash, as compared against a target
    pub fn to_u256(&self) -> U256 {
        U256::from_little_endian(&self.0)
    }

    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        value.to_little_endian(&mut bytes);
        Self(bytes)
    }
}

impl Ord for Hash {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for Hash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; HASH_SIZE] {
    fn from(h: Hash) -> Self {
        h.0
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut be = self.0;
        be.reverse();
        write!(f, "{}", hex::encode(be))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}

impl FromStr for Hash {
    type Err = HashError;

    /// Parses the big-endian display form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s.trim());
        if digits.len() != HASH_SIZE * 2 {
            return Err(HashError::InvalidLength(digits.len()));
        }
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(digits, &mut bytes).map_err(|e| HashError::InvalidHex(e.to_string()))?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_str(&s).map_err(serde::de::Error::custom)
    }
}
