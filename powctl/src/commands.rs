use crate::chain::load_chain;
use crate::cli::Command;
use crate::error::Result;
use consensus_core::{BlockIndex, BlockProof, CompactBits, ConsensusParams, Hash};
use consensus_pow::{ceiling, next_work_required, verify_proof_of_work};
use lux_math::Target;

/// Text to print and whether the command's verdict was positive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub success: bool,
}

impl Output {
    fn ok(text: String) -> Self {
        Self { text, success: true }
    }
}

pub fn run(command: &Command, params: &ConsensusParams) -> Result<Output> {
    match command {
        Command::Decode { bits } => Ok(decode(*bits)),
        Command::Encode { target } => Ok(encode(target)),
        Command::Check { hash, bits } => Ok(check(hash, *bits, params)),
        Command::Next { chain, stake } => {
            let chain = load_chain(chain)?;
            Ok(next(chain.tip(), params, BlockProof::from_stake_flag(*stake)))
        }
        Command::Limits { height } => Ok(limits(*height, params)),
    }
}

pub fn decode(bits: CompactBits) -> Output {
    let decoded = bits.decode();
    let text = format!(
        "bits      {}\ntarget    {}\nnegative  {}\noverflow  {}\nvalid     {}",
        bits,
        decoded.target,
        decoded.negative,
        decoded.overflow,
        decoded.is_valid()
    );
    Output { text, success: decoded.is_valid() }
}

pub fn encode(target: &Target) -> Output {
    let bits = target.to_compact();
    Output::ok(format!("bits      {}\ntarget    {}", bits, bits.decode().target))
}

pub fn check(hash: &Hash, bits: CompactBits, params: &ConsensusParams) -> Output {
    match verify_proof_of_work(hash, bits, params) {
        Ok(target) => Output::ok(format!("valid: {} <= {}", hash, target)),
        Err(err) => {
            tracing::info!(%hash, %bits, "proof of work rejected");
            Output { text: format!("invalid: {}", err), success: false }
        }
    }
}

pub fn next(tip: Option<&BlockIndex>, params: &ConsensusParams, proof: BlockProof) -> Output {
    let bits = next_work_required(tip, params, proof);
    let height = tip.map_or(0, |b| b.height + 1);
    Output::ok(format!(
        "height    {}\nproof     {}\nbits      {}\ntarget    {}",
        height,
        proof,
        bits,
        bits.decode().target
    ))
}

pub fn limits(height: u64, params: &ConsensusParams) -> Output {
    let mut lines = vec![
        format!("network   {}", params.network),
        format!("height    {}", height),
        format!("era       {:?}", params.protocol_era(height)),
        format!("interval  {} blocks", params.retarget_interval()),
    ];
    for proof in [BlockProof::Work, BlockProof::Stake] {
        let limit = ceiling(proof, height, params);
        lines.push(format!("{:<16}{} ({})", proof.to_string(), limit, limit.to_compact()));
    }
    Output::ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_core::config::constants::POW_LIMIT;
    use std::io::Write as _;

    #[test]
    fn decode_reports_flags() {
        let out = decode(CompactBits::new(0x0492_3456));
        assert!(!out.success);
        assert!(out.text.contains("negative  true"));

        let out = decode(CompactBits::new(0x1e0f_ffff));
        assert!(out.success);
        assert!(out.text.contains("target    00000fffff000000"));
    }

    #[test]
    fn decode_prints_one_field_per_line() {
        let out = decode(CompactBits::new(0x1d00_ffff));
        let lines: Vec<&str> = out.text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "bits      0x1d00ffff");
        assert_eq!(lines[4], "valid     true");
    }

    #[test]
    fn encode_prints_canonical_bits() {
        let out = encode(&POW_LIMIT);
        assert!(out.text.starts_with("bits      0x1e0fffff"));
    }

    #[test]
    fn check_reports_reason() {
        let params = ConsensusParams::mainnet();
        let out = check(&Hash::zeroed(), CompactBits::new(0x1d00_ffff), &params);
        assert!(out.success);

        let out = check(&Hash::zeroed(), CompactBits::new(0x1f00_ffff), &params);
        assert!(!out.success);
        assert!(out.text.starts_with("invalid: target"));
    }

    #[test]
    fn next_for_empty_chain_is_limit() {
        let params = ConsensusParams::mainnet();
        let out = next(None, &params, BlockProof::Work);
        assert!(out.text.contains("bits      0x1e0fffff"));
        assert!(out.text.starts_with("height    0"));
    }

    #[test]
    fn run_next_reads_chain_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "time": 0, "bits": "0x1e0fffff", "proof": "work" }},
                {{ "time": 100, "bits": "0x1c0fffff", "proof": "work" }},
                {{ "time": 160, "bits": "0x1c0fffff", "proof": "work" }}
            ]"#
        )
        .unwrap();

        let command = Command::Next { chain: file.path().to_path_buf(), stake: false };
        let out = run(&command, &ConsensusParams::mainnet()).unwrap();
        assert!(out.text.contains("height    3"));
        assert!(out.text.contains("bits      0x1c0fffff"));
    }

    #[test]
    fn limits_show_both_kinds() {
        let out = limits(5, &ConsensusParams::mainnet());
        assert!(out.text.contains("era       V2"));
        assert!(out.text.contains("proof-of-work"));
        assert_eq!(out.text.lines().count(), 6);
        assert!(out.text.contains("proof-of-stake  0000000000000000000000000000000000000000000000000000000000000001 (0x01010000)"));
    }
}
