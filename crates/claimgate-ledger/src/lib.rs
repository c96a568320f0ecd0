//! # claimgate-ledger
//!
//! Ledger-facing surface for bounty claims.
//!
//! This crate provides:
//! - `BountyType` and the per-class claim-window polarity table
//! - `LedgerContract` (the boundary trait consumed by the resolver and
//!   the claim orchestrator)
//! - closer-data ABI encoding and claimant-id derivation
//! - `LedgerSnapshot` (scriptable in-memory ledger for dry runs and tests)
//!
//! It intentionally performs no signing, relaying, or gas estimation.
//! Those concerns live with the transaction-relay collaborator behind
//! `LedgerContract`.

pub mod bounty;
pub mod contract;
pub mod encode;
pub mod snapshot;

pub use bounty::{BountyType, ClaimWindow};
pub use contract::{
    ClaimOptions, DEFAULT_CLAIM_GAS_LIMIT, LedgerContract, LedgerError, TxnReceipt,
};
pub use encode::{CloserDataError, encode_closer_data, generate_claimant_id};
pub use snapshot::{BountyState, LedgerSnapshot};
