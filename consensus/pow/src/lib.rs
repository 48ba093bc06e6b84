//! Difficulty retarget and proof-of-work validation.
//!
//! Everything here is a pure function of an ancestor chain and a
//! [`ConsensusParams`](consensus_core::ConsensusParams). Nothing is cached
//! and nothing is mutated, so calls for competing tips can run in parallel.

pub mod ceiling;
pub mod retarget;
pub mod verify;
pub mod walker;

pub use ceiling::{ceiling, pos_ceiling, pow_ceiling};
pub use retarget::{clamp_to_limit, moving_average_target, next_work_required};
pub use verify::{check_proof_of_work, validate_target, verify_proof_of_work, PowError};
pub use walker::last_block_index;
