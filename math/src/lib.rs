//! 256-bit target arithmetic and the packed 32-bit compact encoding.
//!
//! Block headers carry their work target as [`CompactBits`]; every other
//! part of the node reasons about the expanded [`Target`].

pub mod compact;
pub mod target;

pub use compact::{CompactBits, DecodedTarget};
pub use primitive_types::{U256, U512};
pub use target::Target;

use thiserror::Error;

/// Errors raised while parsing textual targets and compact values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompactError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("hex value has {len} digits, at most {max} allowed")]
    TooLong { len: usize, max: usize },
}

/// Strips an optional `0x`/`0X` prefix.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}
