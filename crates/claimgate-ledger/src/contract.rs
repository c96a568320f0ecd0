//! Boundary trait for the bounty ledger contract.
//!
//! Every method is one blocking read (or one submission) against the
//! external ledger. Implementations own transport, signing, and
//! timeouts; the core performs no retries of its own.

use alloy::primitives::{Address, Bytes};

use crate::bounty::BountyType;

/// Gas-limit ceiling applied to every claim submission.
pub const DEFAULT_CLAIM_GAS_LIMIT: u64 = 3_000_000;

/// Submission options forwarded to the ledger contract.
#[derive(Debug, Clone, Copy)]
pub struct ClaimOptions {
    pub gas_limit: u64,
}

impl Default for ClaimOptions {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_CLAIM_GAS_LIMIT,
        }
    }
}

/// Receipt of a submitted claim transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxnReceipt {
    pub hash: String,
}

/// Errors from interacting with the ledger contract.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger read failed: {0}")]
    Read(String),

    #[error("ledger reports unknown bounty type code {code} for issue {issue_id}")]
    UnknownBountyType { issue_id: String, code: u8 },

    #[error("no bounty is registered for issue {issue_id}")]
    UnknownBounty { issue_id: String },

    #[error("claim submission failed: {0}")]
    Submission(String),
}

/// Read/claim surface of the bounty ledger.
///
/// `issue_id` is the opaque remote issue identifier the bounty was
/// minted against, not its display number.
pub trait LedgerContract {
    fn bounty_type(&self, issue_id: &str) -> Result<BountyType, LedgerError>;

    fn bounty_is_open(&self, issue_id: &str) -> Result<bool, LedgerError>;

    /// On-chain address of the bounty escrow for this issue.
    fn bounty_address(&self, issue_id: &str) -> Result<Address, LedgerError>;

    /// Solvency flag; meaningful for ongoing bounties only.
    fn solvent(&self, issue_id: &str) -> Result<bool, LedgerError>;

    /// Whether `claimant` has already claimed an ongoing bounty using
    /// `asset` (a pull-request URL) as the claim key.
    fn ongoing_claimed(
        &self,
        issue_id: &str,
        claimant: &str,
        asset: &str,
    ) -> Result<bool, LedgerError>;

    /// Whether the zero-indexed `tier` of a tiered bounty is claimed.
    fn tier_claimed(&self, issue_id: &str, tier: u64) -> Result<bool, LedgerError>;

    /// Submit the claim. `closer_data` is the ABI-encoded parameter
    /// tuple from [`crate::encode::encode_closer_data`].
    fn claim_bounty(
        &self,
        issue_id: &str,
        payout_address: Address,
        closer_data: &Bytes,
        options: ClaimOptions,
    ) -> Result<TxnReceipt, LedgerError>;
}
