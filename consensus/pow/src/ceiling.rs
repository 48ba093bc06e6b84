//! Easiest target allowed for each kind of block.

use consensus_core::{BlockProof, ConsensusParams, ProtocolEra, Target};

/// Easiest proof-of-work target of the network
pub fn pow_ceiling(params: &ConsensusParams) -> Target {
    params.pow_limit
}

/// Easiest proof-of-stake target at `height`: lenient before protocol V2,
/// near zero from its activation height on.
pub fn pos_ceiling(height: u64, params: &ConsensusParams) -> Target {
    match params.protocol_era(height) {
        ProtocolEra::V1 => params.pos_limit,
        ProtocolEra::V2 => params.pos_limit_v2,
    }
}

pub fn ceiling(proof: BlockProof, height: u64, params: &ConsensusParams) -> Target {
    match proof {
        BlockProof::Work => pow_ceiling(params),
        BlockProof::Stake => pos_ceiling(height, params),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_core::config::constants::{POS_LIMIT, POS_LIMIT_V2, POW_LIMIT};

    #[test]
    fn test_pow_ceiling_ignores_height() {
        let params = ConsensusParams::mainnet();
        assert_eq!(ceiling(BlockProof::Work, 0, &params), POW_LIMIT);
        assert_eq!(ceiling(BlockProof::Work, 1_000_000, &params), POW_LIMIT);
    }

    #[test]
    fn test_pos_ceiling_tightens_at_activation() {
        let mut params = ConsensusParams::mainnet();
        params.protocol_v2_height = 500;
        assert_eq!(pos_ceiling(0, &params), POS_LIMIT);
        assert_eq!(pos_ceiling(499, &params), POS_LIMIT);
        assert_eq!(pos_ceiling(500, &params), POS_LIMIT_V2);
        assert_eq!(pos_ceiling(501, &params), POS_LIMIT_V2);
        assert!(POS_LIMIT_V2 < POS_LIMIT);
        assert!(!POS_LIMIT_V2.is_zero());
    }

    #[test]
    fn test_testnet_is_strict_from_genesis() {
        let params = ConsensusParams::testnet();
        assert_eq!(ceiling(BlockProof::Stake, 0, &params), POS_LIMIT_V2);
    }
}
