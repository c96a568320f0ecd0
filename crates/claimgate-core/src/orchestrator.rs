//! Claim orchestration: ledger gating, payload build, submission.
//!
//! A resolved withdrawal is checked against live ledger state (claim
//! window per bounty class, solvency for ongoing bounties), encoded
//! into the closer-data tuple, and submitted with the fixed gas-limit
//! ceiling. A rejection from eligibility short-circuits before any
//! contract mutation is attempted.

use alloy::primitives::{Address, Bytes};
use claimgate_ledger::{
    BountyType, ClaimOptions, CloserDataError, LedgerContract, LedgerError, encode_closer_data,
};
use serde::Serialize;

use crate::error::WithdrawalError;
use crate::resolver::{Withdrawal, check_withdrawal_eligibility};
use crate::sources::{IssueTimelineSource, ViewerIdentitySource};

/// Result of a submitted claim: the transaction hash and the exact
/// encoded payload that authorized it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimOutcome {
    pub issue_id: String,
    pub txn_hash: String,
    pub closer_data: Bytes,
}

/// Failure of the claim flow.
///
/// Eligibility and ledger-state rejections carry the core taxonomy;
/// submission failures from the ledger collaborator propagate
/// unwrapped, never reinterpreted as contract-level errors.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    #[error(transparent)]
    Withdrawal(#[from] WithdrawalError),

    #[error(transparent)]
    Payload(#[from] CloserDataError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Execute the on-chain claim for a resolved withdrawal.
pub fn execute_claim(
    ledger: &dyn LedgerContract,
    withdrawal: &Withdrawal,
    payout_address: Address,
) -> Result<ClaimOutcome, ClaimError> {
    let issue_id = withdrawal.issue_id.as_str();
    let bounty_type = ledger.bounty_type(issue_id).map_err(read_failure)?;
    let is_open = ledger.bounty_is_open(issue_id).map_err(read_failure)?;

    if !bounty_type.claimable(is_open) {
        return Err(WithdrawalError::BountyIsClaimed {
            issue_url: withdrawal.issue_url.clone(),
            payout_address: payout_address.to_string(),
        }
        .into());
    }

    if bounty_type == BountyType::Ongoing && !ledger.solvent(issue_id).map_err(read_failure)? {
        return Err(WithdrawalError::BountyIsInsolvent {
            issue_url: withdrawal.issue_url.clone(),
            payout_address: payout_address.to_string(),
        }
        .into());
    }

    let bounty_address = ledger.bounty_address(issue_id).map_err(read_failure)?;
    let closer_data = encode_closer_data(
        bounty_type,
        bounty_address,
        &withdrawal.claimant,
        payout_address,
        &withdrawal.claimant_asset,
        withdrawal.tier,
    )?;

    // Submission errors pass through unwrapped via From<LedgerError>.
    let receipt = ledger.claim_bounty(
        issue_id,
        payout_address,
        &closer_data,
        ClaimOptions::default(),
    )?;

    tracing::info!(
        issue_id,
        txn_hash = %receipt.hash,
        bounty_type = bounty_type.as_str(),
        "claim submitted"
    );

    Ok(ClaimOutcome {
        issue_id: issue_id.to_string(),
        txn_hash: receipt.hash,
        closer_data,
    })
}

/// The full withdrawal flow: resolve eligibility, then claim.
pub fn withdraw(
    timeline_source: &dyn IssueTimelineSource,
    viewer_source: &dyn ViewerIdentitySource,
    ledger: &dyn LedgerContract,
    issue_url: &str,
    payout_address: Address,
) -> Result<ClaimOutcome, ClaimError> {
    let withdrawal = check_withdrawal_eligibility(
        timeline_source,
        viewer_source,
        ledger,
        issue_url,
        &payout_address.to_string(),
    )?;
    execute_claim(ledger, &withdrawal, payout_address)
}

/// Reads ahead of submission stay within the core taxonomy.
fn read_failure(err: LedgerError) -> ClaimError {
    ClaimError::Withdrawal(WithdrawalError::Unknown {
        message: err.to_string(),
    })
}
