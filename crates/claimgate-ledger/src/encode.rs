//! Closer-data ABI encoding and claimant-id derivation.
//!
//! The closer data is the exact parameter tuple the ledger contract
//! expects when authorizing payout:
//!
//! - Single/Ongoing: `(address, string, address, string)`, carrying
//!   bounty address, claimant login, payout address, claimant asset.
//! - Tiered/Competition: the same four fields plus `uint256` tier
//!   (zero-indexed).

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, B256, Bytes, U256, keccak256};

use crate::bounty::BountyType;

#[derive(Debug, thiserror::Error)]
pub enum CloserDataError {
    #[error("bounty class {class} requires a claim tier but none was resolved", class = .bounty_type.as_str())]
    MissingTier { bounty_type: BountyType },
}

/// Build the ABI-encoded parameter tuple authorizing payout.
///
/// `tier` must be present for classes whose payload carries it and is
/// ignored otherwise.
pub fn encode_closer_data(
    bounty_type: BountyType,
    bounty_address: Address,
    claimant: &str,
    payout_address: Address,
    claimant_asset: &str,
    tier: Option<u64>,
) -> Result<Bytes, CloserDataError> {
    let mut fields = vec![
        DynSolValue::Address(bounty_address),
        DynSolValue::String(claimant.to_string()),
        DynSolValue::Address(payout_address),
        DynSolValue::String(claimant_asset.to_string()),
    ];

    if bounty_type.payload_carries_tier() {
        let tier = tier.ok_or(CloserDataError::MissingTier { bounty_type })?;
        fields.push(DynSolValue::Uint(U256::from(tier), 256));
    }

    Ok(DynSolValue::Tuple(fields).abi_encode_params().into())
}

/// Unique claim key for a claimant/asset pair:
/// `keccak256(abi.encode(claimant, claimantAsset))`.
pub fn generate_claimant_id(claimant: &str, claimant_asset: &str) -> B256 {
    let encoded = DynSolValue::Tuple(vec![
        DynSolValue::String(claimant.to_string()),
        DynSolValue::String(claimant_asset.to_string()),
    ])
    .abi_encode_params();
    keccak256(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::dyn_abi::DynSolType;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn single_payload_has_four_fields() {
        let data = encode_closer_data(
            BountyType::Single,
            addr(0x11),
            "octocat",
            addr(0x22),
            "https://github.com/acme/widgets/pull/7",
            None,
        )
        .unwrap();

        let decoded = DynSolType::Tuple(vec![
            DynSolType::Address,
            DynSolType::String,
            DynSolType::Address,
            DynSolType::String,
        ])
        .abi_decode_params(&data)
        .unwrap();

        let DynSolValue::Tuple(fields) = decoded else {
            panic!("expected tuple");
        };
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[1], DynSolValue::String("octocat".to_string()));
    }

    #[test]
    fn tiered_payload_appends_tier() {
        let data = encode_closer_data(
            BountyType::Tiered,
            addr(0x11),
            "octocat",
            addr(0x22),
            "https://github.com/acme/widgets/pull/7",
            Some(0),
        )
        .unwrap();

        let decoded = DynSolType::Tuple(vec![
            DynSolType::Address,
            DynSolType::String,
            DynSolType::Address,
            DynSolType::String,
            DynSolType::Uint(256),
        ])
        .abi_decode_params(&data)
        .unwrap();

        let DynSolValue::Tuple(fields) = decoded else {
            panic!("expected tuple");
        };
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[4], DynSolValue::Uint(U256::ZERO, 256));
    }

    #[test]
    fn tiered_payload_without_tier_is_rejected() {
        let err = encode_closer_data(
            BountyType::Competition,
            addr(0x11),
            "octocat",
            addr(0x22),
            "https://github.com/acme/widgets/pull/7",
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CloserDataError::MissingTier {
                bounty_type: BountyType::Competition
            }
        ));
    }

    #[test]
    fn claimant_id_is_deterministic_and_asset_scoped() {
        let a = generate_claimant_id("octocat", "https://github.com/acme/widgets/pull/7");
        let b = generate_claimant_id("octocat", "https://github.com/acme/widgets/pull/7");
        let c = generate_claimant_id("octocat", "https://github.com/acme/widgets/pull/8");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
