//! Chain fixture files: a JSON list of blocks from genesis to tip.
//!
//! ```json
//! [
//!   { "time": 1700000000, "bits": "0x1e0fffff", "proof": "work" },
//!   { "time": 1700000060, "bits": "0x1e0fffff", "proof": "stake" }
//! ]
//! ```
//!
//! `hash` is optional; entries without one get the height as hash.

use crate::error::{Error, Result};
use consensus_core::{BlockProof, ChainIndex, CompactBits, Hash};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct BlockEntry {
    #[serde(default)]
    pub hash: Option<Hash>,
    pub time: u32,
    pub bits: CompactBits,
    pub proof: BlockProof,
}

pub fn chain_from_entries(entries: &[BlockEntry]) -> ChainIndex {
    let mut chain = ChainIndex::new();
    for (height, entry) in entries.iter().enumerate() {
        let hash = entry.hash.unwrap_or_else(|| Hash::from_u64_word(height as u64));
        chain.push(hash, entry.time, entry.bits, entry.proof);
    }
    chain
}

pub fn parse_chain(json: &str) -> Result<ChainIndex> {
    let entries: Vec<BlockEntry> = serde_json::from_str(json)?;
    Ok(chain_from_entries(&entries))
}

pub fn load_chain(path: &Path) -> Result<ChainIndex> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let chain = parse_chain(&content)?;
    if chain.is_empty() {
        return Err(Error::EmptyChain(path.to_path_buf()));
    }
    tracing::debug!("loaded {} blocks from {}", chain.len(), path.display());
    Ok(chain)
}
