use thiserror::Error;

/// Consensus parameters that would break the difficulty rules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("target spacing must be positive, got {0}")]
    NonPositiveSpacing(i64),

    #[error("target timespan must be positive, got {0}")]
    NonPositiveTimespan(i64),

    #[error("{0} limit must be non-zero")]
    ZeroLimit(&'static str),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("invalid hash hex: {0}")]
    InvalidHex(String),

    #[error("hash must be 64 hex digits, got {0}")]
    InvalidLength(usize),
}
