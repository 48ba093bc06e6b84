use crate::ceiling::pow_ceiling;
use consensus_core::{CompactBits, ConsensusParams, Hash, Target};
use log::debug;
use thiserror::Error;

/// Why a block failed the proof-of-work check
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowError {
    #[error("compact target {0} is negative")]
    NegativeTarget(CompactBits),

    #[error("compact target {0} is zero")]
    ZeroTarget(CompactBits),

    #[error("compact target {0} overflows 256 bits")]
    TargetOverflow(CompactBits),

    #[error("target {target} is easier than the limit {limit}")]
    TargetAboveLimit { target: Target, limit: Target },

    #[error("hash {hash} is above target {target}")]
    HashAboveTarget { hash: Hash, target: Target },
}

/// Decodes `bits` and checks it is a usable proof-of-work target.
pub fn validate_target(bits: CompactBits, params: &ConsensusParams) -> Result<Target, PowError> {
    let decoded = bits.decode();

    if decoded.negative {
        return Err(PowError::NegativeTarget(bits));
    }
    if decoded.overflow {
        return Err(PowError::TargetOverflow(bits));
    }
    if decoded.target.is_zero() {
        return Err(PowError::ZeroTarget(bits));
    }

    let limit = pow_ceiling(params);
    if decoded.target > limit {
        return Err(PowError::TargetAboveLimit { target: decoded.target, limit });
    }

    Ok(decoded.target)
}

/// Checks that `hash` satisfies the target claimed by `bits`, returning the
/// target on success and the reason otherwise.
pub fn verify_proof_of_work(hash: &Hash, bits: CompactBits, params: &ConsensusParams) -> Result<Target, PowError> {
    let target = validate_target(bits, params)?;
    if hash.to_u256() > target.as_u256() {
        return Err(PowError::HashAboveTarget { hash: *hash, target });
    }
    Ok(target)
}

/// Whether a block hash satisfies the proof-of-work requirement of `bits`.
pub fn check_proof_of_work(hash: &Hash, bits: CompactBits, params: &ConsensusParams) -> bool {
    match verify_proof_of_work(hash, bits, params) {
        Ok(_) => true,
        Err(err) => {
            debug!("proof of work rejected: {}", err);
            false
        }
    }
}
