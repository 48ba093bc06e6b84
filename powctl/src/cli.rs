use clap::{Parser, Subcommand};
use consensus_core::{CompactBits, Hash, NetworkType};
use lux_math::Target;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "powctl")]
#[command(about = "Compact targets, proof-of-work checks and difficulty retargeting", long_about = None)]
pub struct Args {
    /// Path to configuration file (optional, uses network defaults if not provided)
    #[arg(short, long)]
    pub config_path: Option<PathBuf>,

    /// Network (mainnet, testnet, devnet, simnet), overrides the config file
    #[arg(short, long)]
    pub network: Option<NetworkType>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Expand compact bits into a 256-bit target
    Decode {
        /// Compact bits, e.g. 0x1e0fffff
        bits: CompactBits,
    },

    /// Pack a 256-bit target into compact bits
    Encode {
        /// Target as big-endian hex
        target: Target,
    },

    /// Check a block hash against compact bits
    Check {
        #[arg(long)]
        hash: Hash,

        #[arg(long)]
        bits: CompactBits,
    },

    /// Compute the bits required for the block after the tip of a chain file
    Next {
        /// JSON file listing blocks from genesis to tip
        #[arg(long)]
        chain: PathBuf,

        /// Retarget proof-of-stake instead of proof-of-work
        #[arg(long)]
        stake: bool,
    },

    /// Show the difficulty limits in force at a height
    Limits {
        #[arg(long, default_value_t = 0)]
        height: u64,
    },
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subcommands() {
        let args = Args::try_parse_from(["powctl", "--network", "testnet", "decode", "0x1e0fffff"]).unwrap();
        assert_eq!(args.network, Some(NetworkType::Testnet));
        assert!(matches!(args.command, Command::Decode { bits } if bits.to_u32() == 0x1e0f_ffff));

        let args = Args::try_parse_from(["powctl", "next", "--chain", "chain.json", "--stake"]).unwrap();
        assert!(matches!(args.command, Command::Next { stake: true, .. }));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from(["powctl", "decode", "nothex"]).is_err());
        assert!(Args::try_parse_from(["powctl", "--network", "regtest", "limits"]).is_err());
        assert!(Args::try_parse_from(["powctl", "check", "--hash", "00", "--bits", "0x1d00ffff"]).is_err());
    }
}
