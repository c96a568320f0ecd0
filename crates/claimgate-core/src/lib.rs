//! # claimgate-core
//!
//! Withdrawal eligibility resolution for issue bounties.
//!
//! This crate provides:
//! - the normalized issue-timeline data model (`timeline`)
//! - text-history reconstruction at merge time (`history`)
//! - closing-reference and tier-marker extraction (`extract`)
//! - the eligibility resolver (`resolver`)
//! - the claim orchestrator (`orchestrator`)
//! - the terminal error taxonomy (`error`)
//!
//! ## Data flow
//!
//! ```text
//! remote timeline ──▶ classifier ──▶ reconstructor + extractor (per candidate)
//!                                         │
//!                                         ▼
//!                                eligibility resolver ──▶ claim orchestrator
//! ```
//!
//! Remote reads arrive through the boundary traits in `sources`; the
//! ledger through `claimgate_ledger::LedgerContract`. One resolution
//! call produces exactly one terminal outcome: a `Withdrawal` or one
//! typed rejection.

pub mod error;
pub mod extract;
pub mod history;
pub mod orchestrator;
pub mod resolver;
pub mod sources;
pub mod timeline;

pub use error::WithdrawalError;
pub use extract::{closer_issue_numbers, tier_placement};
pub use history::content_at_merge;
pub use orchestrator::{ClaimError, ClaimOutcome, execute_claim, withdraw};
pub use resolver::{
    TEXT_JOIN_DELIMITER, Withdrawal, check_withdrawal_eligibility, resolve_timeline,
};
pub use sources::{IssueTimelineSource, SourceError, ViewerIdentitySource};
pub use timeline::{
    CandidateComment, EditRecord, Issue, IssueTimeline, PullRequestCandidate, ReferenceSource,
    TimelineEvent,
};
