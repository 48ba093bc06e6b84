use consensus_core::{BlockIndex, BlockProof};

/// Returns the nearest block of kind `proof`, starting with `start` itself.
///
/// Genesis ends the walk whatever its kind, so the result is never missing.
pub fn last_block_index(start: &BlockIndex, proof: BlockProof) -> &BlockIndex {
    let mut index = start;
    while index.proof != proof {
        match index.prev() {
            Some(prev) => index = prev,
            None => break,
        }
    }
    index
}
