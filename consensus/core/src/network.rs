use crate::errors::ParamsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network type identifies the network a node is operating on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Main network
    Mainnet,
    /// Test network
    Testnet,
    /// Development network
    Devnet,
    /// Simnet for testing
    Simnet,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::Mainnet => write!(f, "mainnet"),
            NetworkType::Testnet => write!(f, "testnet"),
            NetworkType::Devnet => write!(f, "devnet"),
            NetworkType::Simnet => write!(f, "simnet"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(NetworkType::Mainnet),
            "testnet" => Ok(NetworkType::Testnet),
            "devnet" => Ok(NetworkType::Devnet),
            "simnet" => Ok(NetworkType::Simnet),
            _ => Err(ParamsError::UnknownNetwork(s.to_string())),
        }
    }
}

impl NetworkType {
    /// Returns an iterator over all NetworkType variants
    pub fn iter() -> impl Iterator<Item = NetworkType> {
        [NetworkType::Mainnet, NetworkType::Testnet, NetworkType::Devnet, NetworkType::Simnet].into_iter()
    }
}
