use crate::cli::Args;
use crate::error::{Error, Result};
use consensus_core::{ConsensusParams, NetworkType};
use lux_math::Target;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub consensus: ConsensusConfig,
}

/// `[consensus]` section: a network preset plus optional per-field overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    pub network: NetworkType,
    pub pow_target_spacing: Option<i64>,
    pub pow_target_timespan: Option<i64>,
    pub pow_limit: Option<Target>,
    pub pos_limit: Option<Target>,
    pub pos_limit_v2: Option<Target>,
    pub protocol_v2_height: Option<u64>,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            network: NetworkType::Mainnet,
            pow_target_spacing: None,
            pow_target_timespan: None,
            pow_limit: None,
            pos_limit: None,
            pos_limit_v2: None,
            protocol_v2_height: None,
        }
    }
}

impl Config {
    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("config file {} not found, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn for_network(network: NetworkType) -> Self {
        let mut config = Config::default();
        config.consensus.network = network;
        config
    }

    /// Override config with CLI arguments
    pub fn apply_cli_overrides(&mut self, args: &Args) {
        if let Some(network) = args.network {
            self.consensus.network = network;
        }
    }

    /// Network preset with the configured overrides applied, validated
    pub fn consensus_params(&self) -> Result<ConsensusParams> {
        let section = &self.consensus;
        let mut params = ConsensusParams::for_network(section.network);

        if let Some(spacing) = section.pow_target_spacing {
            params.pow_target_spacing = spacing;
        }
        if let Some(timespan) = section.pow_target_timespan {
            params.pow_target_timespan = timespan;
        }
        if let Some(limit) = section.pow_limit {
            params.pow_limit = limit;
        }
        if let Some(limit) = section.pos_limit {
            params.pos_limit = limit;
        }
        if let Some(limit) = section.pos_limit_v2 {
            params.pos_limit_v2 = limit;
        }
        if let Some(height) = section.protocol_v2_height {
            params.protocol_v2_height = height;
        }

        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;
    use consensus_core::ParamsError;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.consensus_params().unwrap(), ConsensusParams::mainnet());
    }

    #[test]
    fn loads_overrides_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[consensus]
network = "devnet"
pow_target_spacing = 120
pow_target_timespan = 1920
pos_limit_v2 = "0000000000ffffffffffffffffffffffffffffffffffffffffffffffffffffff"
"#
        )
        .unwrap();

        let params = Config::load(file.path()).unwrap().consensus_params().unwrap();
        assert_eq!(params.network, NetworkType::Devnet);
        assert_eq!(params.pow_target_spacing, 120);
        assert_eq!(params.retarget_interval(), 16);
        assert_eq!(params.pos_limit_v2.to_compact().to_u32(), 0x1c00_ffff);
        assert_eq!(params.pow_limit, ConsensusParams::devnet().pow_limit);
    }

    #[test]
    fn empty_file_is_mainnet() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.consensus.network, NetworkType::Mainnet);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let config = Config::from_toml("[consensus]\nnetwork = \"mainnet\"\npow_target_spacing = 0\n").unwrap();
        assert!(matches!(config.consensus_params(), Err(Error::Params(ParamsError::NonPositiveSpacing(0)))));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(Config::from_toml("[consensus\n"), Err(Error::Toml(_))));
        assert!(Config::from_toml("[consensus]\nnetwork = \"moon\"\n").is_err());
    }

    #[test]
    fn cli_network_wins() {
        let mut config = Config::for_network(NetworkType::Devnet);
        let args = Args {
            config_path: None,
            network: Some(NetworkType::Testnet),
            log_level: "warn".to_string(),
            command: Command::Limits { height: 0 },
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.consensus_params().unwrap(), ConsensusParams::testnet());
    }
}
