//! Per-block difficulty retarget.
//!
//! Each kind of block (work or stake) is retargeted from the spacing of its
//! own two most recent blocks, with an exponential moving average toward
//! the target spacing:
//!
//! ```text
//! new = prev * ((N - 1) * spacing + 2 * actual) / ((N + 1) * spacing)
//! N   = timespan / spacing
//! ```

use crate::ceiling::ceiling;
use crate::walker::last_block_index;
use consensus_core::{BlockIndex, BlockProof, CompactBits, ConsensusParams, Target};
use log::{debug, trace};
use primitive_types::{U256, U512};

/// Compact target required for the block following `last`.
///
/// Falls back to the ceiling while fewer than two blocks of kind `proof`
/// follow genesis. The result always decodes to a target in `1..=ceiling`.
///
/// # Panics
///
/// If `params.pow_target_spacing` is zero; see [`ConsensusParams::validate`].
pub fn next_work_required(last: Option<&BlockIndex>, params: &ConsensusParams, proof: BlockProof) -> CompactBits {
    let limit = ceiling(proof, last.map_or(0, |b| b.height), params);

    let Some(last) = last else {
        trace!("no previous block, {} starts at the limit", proof);
        return limit.to_compact();
    };

    let prev = last_block_index(last, proof);
    let Some(prev_parent) = prev.prev() else {
        trace!("first {} block, using the limit", proof);
        return limit.to_compact();
    };

    let prev_prev = last_block_index(prev_parent, proof);
    if prev_prev.is_genesis() {
        trace!("second {} block, using the limit", proof);
        return limit.to_compact();
    }

    let mut actual_spacing = prev.block_time() - prev_prev.block_time();
    if actual_spacing < 0 {
        trace!("out-of-order timestamps at height {}, assuming target spacing", prev.height);
        actual_spacing = params.pow_target_spacing;
    }

    // Anchor on the last block of this kind, not on `last`
    let prev_target = prev.bits.decode().target;
    let new_target = clamp_to_limit(moving_average_target(prev_target, actual_spacing, params), limit);

    let bits = new_target.to_compact();
    debug!(
        "{} retarget at height {}: spacing {}s, {} -> {}",
        proof,
        last.height + 1,
        actual_spacing,
        prev.bits,
        bits
    );
    bits
}

/// One moving-average step from `prev_target` given the observed spacing.
///
/// Computed in 512 bits, a result wider than 256 bits saturates to the
/// maximum. A non-positive weighted spacing yields zero.
///
/// # Panics
///
/// If `params.pow_target_spacing` is zero.
pub fn moving_average_target(prev_target: Target, actual_spacing: i64, params: &ConsensusParams) -> Target {
    let spacing = i128::from(params.pow_target_spacing);
    let interval = i128::from(params.retarget_interval());

    let numerator = (interval - 1) * spacing + 2 * i128::from(actual_spacing);
    let denominator = (interval + 1) * spacing;
    if numerator <= 0 || denominator <= 0 {
        return Target::zero();
    }

    // Widened to 512 bits and saturated below; a 256-bit product would wrap
    let wide = prev_target.as_u256().full_mul(U256::from(numerator as u128)) / U512::from(denominator as u128);
    U256::try_from(wide).map(Target::from).unwrap_or(Target::new(U256::MAX))
}

/// Replaces zero or anything easier than `limit` with `limit`.
pub fn clamp_to_limit(target: Target, limit: Target) -> Target {
    if target.is_zero() || target > limit {
        limit
    } else {
        target
    }
}
