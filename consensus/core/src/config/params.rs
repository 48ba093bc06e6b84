use super::constants::*;
use crate::errors::ParamsError;
use crate::network::NetworkType;
use lux_math::Target;
use serde::{Deserialize, Serialize};

/// Protocol generation in force at a given height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolEra {
    V1,
    V2,
}

/// Consensus parameters of the difficulty rules.
///
/// Passed explicitly to every difficulty and proof-of-work function; there is
/// no process-wide instance. Call [`validate`](Self::validate) once when the
/// parameters are loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    pub network: NetworkType,
    /// Target seconds between two blocks of the same kind
    pub pow_target_spacing: i64,
    /// Averaging window in seconds; `timespan / spacing` is the smoothing length in blocks
    pub pow_target_timespan: i64,
    /// Easiest proof-of-work target
    pub pow_limit: Target,
    /// Easiest proof-of-stake target before protocol V2
    pub pos_limit: Target,
    /// Easiest proof-of-stake target from protocol V2 on
    pub pos_limit_v2: Target,
    /// First height running protocol V2
    pub protocol_v2_height: u64,
}

impl ConsensusParams {
    pub fn mainnet() -> Self {
        Self {
            network: NetworkType::Mainnet,
            pow_target_spacing: TARGET_SPACING,
            pow_target_timespan: TARGET_TIMESPAN,
            pow_limit: POW_LIMIT,
            pos_limit: POS_LIMIT,
            pos_limit_v2: POS_LIMIT_V2,
            protocol_v2_height: PROTOCOL_V2_HEIGHT,
        }
    }

    /// Testnet runs protocol V2 from genesis
    pub fn testnet() -> Self {
        Self { network: NetworkType::Testnet, protocol_v2_height: 0, ..Self::mainnet() }
    }

    pub fn devnet() -> Self {
        Self { network: NetworkType::Devnet, pow_limit: POW_LIMIT_LOCAL, ..Self::mainnet() }
    }

    /// Fast blocks, and protocol V2 never activates so stake retargeting stays observable
    pub fn simnet() -> Self {
        Self {
            network: NetworkType::Simnet,
            pow_target_spacing: SIMNET_TARGET_SPACING,
            pow_target_timespan: SIMNET_TARGET_TIMESPAN,
            pow_limit: POW_LIMIT_LOCAL,
            pos_limit: POW_LIMIT_LOCAL,
            protocol_v2_height: u64::MAX,
            ..Self::mainnet()
        }
    }

    pub fn for_network(network: NetworkType) -> Self {
        match network {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Testnet => Self::testnet(),
            NetworkType::Devnet => Self::devnet(),
            NetworkType::Simnet => Self::simnet(),
        }
    }

    /// Checks the invariants the difficulty rules rely on.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.pow_target_spacing <= 0 {
            return Err(ParamsError::NonPositiveSpacing(self.pow_target_spacing));
        }
        if self.pow_target_timespan <= 0 {
            return Err(ParamsError::NonPositiveTimespan(self.pow_target_timespan));
        }
        if self.pow_limit.is_zero() {
            return Err(ParamsError::ZeroLimit("proof-of-work"));
        }
        if self.pos_limit.is_zero() || self.pos_limit_v2.is_zero() {
            return Err(ParamsError::ZeroLimit("proof-of-stake"));
        }
        Ok(())
    }

    /// Smoothing window of the moving-average retarget, in blocks.
    ///
    /// # Panics
    ///
    /// If `pow_target_spacing` is zero, which [`validate`](Self::validate) rejects.
    pub fn retarget_interval(&self) -> i64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    pub fn protocol_era(&self, height: u64) -> ProtocolEra {
        if height >= self.protocol_v2_height {
            ProtocolEra::V2
        } else {
            ProtocolEra::V1
        }
    }

    pub fn is_protocol_v2(&self, height: u64) -> bool {
        self.protocol_era(height) == ProtocolEra::V2
    }
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for network in NetworkType::iter() {
            let params = ConsensusParams::for_network(network);
            assert_eq!(params.network, network);
            assert_eq!(params.validate(), Ok(()));
        }
    }

    #[test]
    fn mainnet_interval() {
        assert_eq!(ConsensusParams::mainnet().retarget_interval(), 16);
        assert_eq!(ConsensusParams::simnet().retarget_interval(), 16);
    }

    #[test]
    fn protocol_era_by_height() {
        let mainnet = ConsensusParams::mainnet();
        assert_eq!(mainnet.protocol_era(0), ProtocolEra::V1);
        assert_eq!(mainnet.protocol_era(1), ProtocolEra::V2);
        assert!(mainnet.is_protocol_v2(1_000_000));

        let testnet = ConsensusParams::testnet();
        assert_eq!(testnet.protocol_era(0), ProtocolEra::V2);

        let simnet = ConsensusParams::simnet();
        assert_eq!(simnet.protocol_era(u64::MAX - 1), ProtocolEra::V1);
    }

    #[test]
    fn validate_rejects_bad_params() {
        let mut params = ConsensusParams::mainnet();
        params.pow_target_spacing = 0;
        assert_eq!(params.validate(), Err(ParamsError::NonPositiveSpacing(0)));

        let mut params = ConsensusParams::mainnet();
        params.pow_target_timespan = -5;
        assert_eq!(params.validate(), Err(ParamsError::NonPositiveTimespan(-5)));

        let mut params = ConsensusParams::mainnet();
        params.pos_limit_v2 = Target::zero();
        assert_eq!(params.validate(), Err(ParamsError::ZeroLimit("proof-of-stake")));
    }

    #[test]
    fn serde_round_trip() {
        let params = ConsensusParams::devnet();
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"network\":\"devnet\""));
        let back: ConsensusParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
