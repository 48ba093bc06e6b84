//! Compact ("nBits") target encoding.
//!
//! Layout of the 32 bits, most significant first:
//!
//! ```text
//! [ size: 8 ][ sign: 1 ][ mantissa: 23 ]
//! ```
//!
//! The encoded value is `mantissa * 256^(size - 3)`. The sign bit and an
//! oversized exponent are not errors of the codec itself, they are reported
//! through [`DecodedTarget`] so consensus code can reject them explicitly.

use crate::{strip_hex_prefix, CompactError, Target, U256};
use borsh_derive::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Sign bit of the packed mantissa
pub const SIGN_BIT: u32 = 0x0080_0000;

/// Unsigned mantissa mask
pub const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Packed 32-bit representation of a [`Target`], as stored in a block header.
///
/// Borsh encodes it as the 4 little-endian bytes of the header field.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
pub struct CompactBits(u32);

/// Result of expanding a [`CompactBits`] value.
///
/// `target` holds the magnitude even when `negative` or `overflow` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedTarget {
    pub target: Target,
    pub negative: bool,
    pub overflow: bool,
}

impl DecodedTarget {
    /// A decoded target is usable only if it is neither negative, overflowed nor zero.
    pub fn is_valid(&self) -> bool {
        !self.negative && !self.overflow && !self.target.is_zero()
    }

    /// Returns the target when [`is_valid`](Self::is_valid) holds.
    pub fn into_valid(self) -> Option<Target> {
        self.is_valid().then_some(self.target)
    }
}

impl CompactBits {
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Byte length of the significant digits
    pub const fn size(self) -> u32 {
        self.0 >> 24
    }

    /// Unsigned 23-bit mantissa
    pub const fn mantissa(self) -> u32 {
        self.0 & MANTISSA_MASK
    }

    /// Expands the packed value into a 256-bit target.
    ///
    /// Bits shifted past the 256-bit width are dropped; such inputs always
    /// come back with `overflow` set.
    pub fn decode(self) -> DecodedTarget {
        let size = self.size();
        let mut word = self.mantissa();

        // For sizes up to 3 the flags below look at the shifted word
        let value = if size <= 3 {
            word >>= 8 * (3 - size);
            U256::from(word)
        } else {
            let shift = 8 * (size - 3) as usize;
            if shift >= 256 {
                U256::zero()
            } else {
                U256::from(word) << shift
            }
        };

        let negative = word != 0 && self.0 & SIGN_BIT != 0;
        let overflow = word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

        DecodedTarget { target: Target::new(value), negative, overflow }
    }

    /// Canonical encoding of `target`: the smallest size whose mantissa keeps
    /// the sign bit clear. Zero encodes as `0x00000000`.
    pub fn encode(target: &Target) -> Self {
        let value = target.as_u256();
        let mut size = ((value.bits() + 7) / 8) as u32;

        let mut compact = if size <= 3 {
            (value.low_u64() << (8 * (3 - size))) as u32
        } else {
            (value >> (8 * (size - 3)) as usize).low_u32()
        };

        // A set 0x00800000 bit would read back as negative
        if compact & SIGN_BIT != 0 {
            compact >>= 8;
            size += 1;
        }

        Self(compact | (size << 24))
    }
}

impl From<u32> for CompactBits {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<CompactBits> for u32 {
    fn from(bits: CompactBits) -> Self {
        bits.0
    }
}

impl From<&Target> for CompactBits {
    fn from(target: &Target) -> Self {
        Self::encode(target)
    }
}

impl fmt::Display for CompactBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::Debug for CompactBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactBits(0x{:08x})", self.0)
    }
}

impl fmt::LowerHex for CompactBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl FromStr for CompactBits {
    type Err = CompactError;

    /// Parses `0x1d00ffff` or `1d00ffff`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s.trim());
        if digits.len() > 8 {
            return Err(CompactError::TooLong { len: digits.len(), max: 8 });
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| CompactError::InvalidHex(format!("{}: {}", s, e)))
    }
}

impl Serialize for CompactBits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CompactBits {
    /// Accepts either a hex string or a plain integer.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(u32),
            Hex(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(bits) => Ok(Self(bits)),
            Repr::Hex(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
