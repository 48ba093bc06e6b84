//! Per-network difficulty constants.

use lux_math::{Target, U256};

/// Target time between blocks in seconds
pub const TARGET_SPACING: i64 = 60;

/// Averaging window of the moving-average retarget, in seconds (16 blocks)
pub const TARGET_TIMESPAN: i64 = 16 * TARGET_SPACING;

/// Simnet blocks are one second apart
pub const SIMNET_TARGET_SPACING: i64 = 1;

pub const SIMNET_TARGET_TIMESPAN: i64 = 16 * SIMNET_TARGET_SPACING;

/// `0x00000fff..ff`: easiest proof-of-work target on public networks
pub const POW_LIMIT: Target = Target::new(U256([u64::MAX, u64::MAX, u64::MAX, 0x0000_0fff_ffff_ffff]));

/// `0x7fff..ff`: easiest target on local networks, any other hash passes
pub const POW_LIMIT_LOCAL: Target = Target::new(U256([u64::MAX, u64::MAX, u64::MAX, 0x7fff_ffff_ffff_ffff]));

/// Proof-of-stake limit before protocol V2
pub const POS_LIMIT: Target = POW_LIMIT;

/// Proof-of-stake limit from protocol V2 on: the hardest non-zero target
pub const POS_LIMIT_V2: Target = Target::new(U256([1, 0, 0, 0]));

/// Protocol V2 starts with the first block after genesis
pub const PROTOCOL_V2_HEIGHT: u64 = 1;
