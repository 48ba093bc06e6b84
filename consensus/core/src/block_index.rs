//! Immutable block index entries linked to their parents.
//!
//! An entry is shared behind an [`Arc`] once published and never changes
//! afterwards, so difficulty code can walk ancestors from several threads
//! without locking.

use crate::hash::Hash;
use lux_math::CompactBits;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// How a block was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockProof {
    Work,
    Stake,
}

impl BlockProof {
    pub fn from_stake_flag(is_stake: bool) -> Self {
        if is_stake {
            BlockProof::Stake
        } else {
            BlockProof::Work
        }
    }

    pub fn is_stake(self) -> bool {
        self == BlockProof::Stake
    }
}

impl fmt::Display for BlockProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockProof::Work => write!(f, "proof-of-work"),
            BlockProof::Stake => write!(f, "proof-of-stake"),
        }
    }
}

/// One block's position in the chain
#[derive(Debug, Clone)]
pub struct BlockIndex {
    pub hash: Hash,
    pub height: u64,
    /// Header timestamp, seconds. Not trusted to be monotonic.
    pub time: u32,
    pub bits: CompactBits,
    pub proof: BlockProof,
    prev: Option<Arc<BlockIndex>>,
}

impl BlockIndex {
    /// Creates the height-0 entry
    pub fn genesis(hash: Hash, time: u32, bits: CompactBits, proof: BlockProof) -> Arc<Self> {
        Arc::new(Self { hash, height: 0, time, bits, proof, prev: None })
    }

    /// Creates the entry following `parent`
    pub fn new_child(parent: &Arc<BlockIndex>, hash: Hash, time: u32, bits: CompactBits, proof: BlockProof) -> Arc<Self> {
        Arc::new(Self { hash, height: parent.height + 1, time, bits, proof, prev: Some(Arc::clone(parent)) })
    }

    /// Parent entry, `None` only at genesis
    pub fn prev(&self) -> Option<&BlockIndex> {
        self.prev.as_deref()
    }

    pub fn is_genesis(&self) -> bool {
        self.prev.is_none()
    }

    pub fn block_time(&self) -> i64 {
        i64::from(self.time)
    }

    pub fn is_proof_of_stake(&self) -> bool {
        self.proof.is_stake()
    }

    /// Iterates over `self`, its parent, and so on down to genesis
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }
}

impl Drop for BlockIndex {
    // Unlink iteratively, a long chain would otherwise drop recursively
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(node) = prev {
            match Arc::try_unwrap(node) {
                Ok(mut inner) => prev = inner.prev.take(),
                Err(_) => break,
            }
        }
    }
}

pub struct Ancestors<'a> {
    next: Option<&'a BlockIndex>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a BlockIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.prev();
        Some(current)
    }
}

/// Append-only chain of published entries, indexed by height and hash
#[derive(Debug, Clone, Default)]
pub struct ChainIndex {
    blocks: Vec<Arc<BlockIndex>>,
    by_hash: HashMap<Hash, usize>,
}

impl ChainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block on top of the current tip (or as genesis) and returns it
    pub fn push(&mut self, hash: Hash, time: u32, bits: CompactBits, proof: BlockProof) -> Arc<BlockIndex> {
        let entry = match self.blocks.last() {
            Some(tip) => BlockIndex::new_child(tip, hash, time, bits, proof),
            None => BlockIndex::genesis(hash, time, bits, proof),
        };
        self.by_hash.insert(hash, self.blocks.len());
        self.blocks.push(Arc::clone(&entry));
        entry
    }

    pub fn tip(&self) -> Option<&BlockIndex> {
        self.blocks.last().map(Arc::as_ref)
    }

    pub fn get(&self, height: u64) -> Option<&BlockIndex> {
        usize::try_from(height).ok().and_then(|h| self.blocks.get(h)).map(Arc::as_ref)
    }

    pub fn get_by_hash(&self, hash: &Hash) -> Option<&BlockIndex> {
        self.by_hash.get(hash).map(|&i| self.blocks[i].as_ref())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
