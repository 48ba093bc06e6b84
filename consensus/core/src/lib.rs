//! Core types shared by the difficulty and proof-of-work rules:
//! block index entries, block hashes, networks and consensus parameters.

pub mod block_index;
pub mod config;
pub mod errors;
pub mod hash;
pub mod network;

pub use block_index::{Ancestors, BlockIndex, BlockProof, ChainIndex};
pub use config::params::{ConsensusParams, ProtocolEra};
pub use errors::{HashError, ParamsError};
pub use hash::Hash;
pub use network::NetworkType;

pub use lux_math::{CompactBits, DecodedTarget, Target, U256};
