//! Scriptable in-memory ledger snapshot.
//!
//! Backs dry-run resolution in the CLI and deterministic tests: bounty
//! state is loaded from JSON keyed by issue id, and claims produce a
//! pseudo transaction hash derived from the submitted payload.

use std::collections::{BTreeMap, BTreeSet};

use alloy::primitives::{Address, Bytes, keccak256};
use serde::{Deserialize, Serialize};

use crate::bounty::BountyType;
use crate::contract::{ClaimOptions, LedgerContract, LedgerError, TxnReceipt};
use crate::encode::generate_claimant_id;

/// Recorded state of one bounty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BountyState {
    pub bounty_type: BountyType,
    pub address: Address,
    #[serde(default = "default_true")]
    pub open: bool,
    #[serde(default = "default_true")]
    pub solvent: bool,
    /// Claimant ids (see [`generate_claimant_id`], hex with 0x prefix)
    /// that have already drawn from an ongoing bounty.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub claimed_assets: BTreeSet<String>,
    /// Zero-indexed tiers already paid out.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub claimed_tiers: BTreeSet<u64>,
}

fn default_true() -> bool {
    true
}

/// JSON-loadable ledger state, one entry per bountied issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub bounties: BTreeMap<String, BountyState>,
}

impl LedgerSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn bounty(&self, issue_id: &str) -> Result<&BountyState, LedgerError> {
        self.bounties
            .get(issue_id)
            .ok_or_else(|| LedgerError::UnknownBounty {
                issue_id: issue_id.to_string(),
            })
    }
}

impl LedgerContract for LedgerSnapshot {
    fn bounty_type(&self, issue_id: &str) -> Result<BountyType, LedgerError> {
        Ok(self.bounty(issue_id)?.bounty_type)
    }

    fn bounty_is_open(&self, issue_id: &str) -> Result<bool, LedgerError> {
        Ok(self.bounty(issue_id)?.open)
    }

    fn bounty_address(&self, issue_id: &str) -> Result<Address, LedgerError> {
        Ok(self.bounty(issue_id)?.address)
    }

    fn solvent(&self, issue_id: &str) -> Result<bool, LedgerError> {
        Ok(self.bounty(issue_id)?.solvent)
    }

    fn ongoing_claimed(
        &self,
        issue_id: &str,
        claimant: &str,
        asset: &str,
    ) -> Result<bool, LedgerError> {
        let claimant_id = generate_claimant_id(claimant, asset);
        Ok(self
            .bounty(issue_id)?
            .claimed_assets
            .contains(&claimant_id.to_string()))
    }

    fn tier_claimed(&self, issue_id: &str, tier: u64) -> Result<bool, LedgerError> {
        Ok(self.bounty(issue_id)?.claimed_tiers.contains(&tier))
    }

    fn claim_bounty(
        &self,
        issue_id: &str,
        payout_address: Address,
        closer_data: &Bytes,
        options: ClaimOptions,
    ) -> Result<TxnReceipt, LedgerError> {
        // Dry run: no state mutates, the hash commits to the payload.
        self.bounty(issue_id)?;
        tracing::debug!(
            issue_id,
            %payout_address,
            gas_limit = options.gas_limit,
            "simulating claim submission"
        );
        let hash = keccak256(closer_data);
        Ok(TxnReceipt {
            hash: hash.to_string(),
        })
    }
}
