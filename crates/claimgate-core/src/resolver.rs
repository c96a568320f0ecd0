//! Withdrawal eligibility resolution.
//!
//! Single forward pass over the issue timeline with an explicit
//! early-exit: the first eligible-and-unclaimed candidate in timeline
//! order wins. Later iterations depend on accumulated claimed-state,
//! so the scan is strictly sequential.
//!
//! A candidate is eligible iff:
//! - the pull request is merged,
//! - the authenticated caller authored it,
//! - it merged into a repository owned by the issue's owner, and
//! - its text (body plus comments, each reconstructed at merge time)
//!   closes the issue.

use claimgate_ledger::{BountyType, LedgerContract, LedgerError};
use serde::Serialize;

use crate::error::WithdrawalError;
use crate::extract::{closer_issue_numbers, tier_placement};
use crate::history::content_at_merge;
use crate::sources::{IssueTimelineSource, SourceError, ViewerIdentitySource};
use crate::timeline::{IssueTimeline, PullRequestCandidate};

/// Joins body and comment sections before extraction. Chosen so it
/// cannot occur in legitimate pull-request text and cannot splice two
/// sections into a false keyword/reference pair.
pub const TEXT_JOIN_DELIMITER: &str = " -DELIMITER_SYMBOL- ";

/// Successful eligibility resolution.
///
/// `tier` is zero-indexed; `claimant_asset` is the winning pull
/// request's canonical URL, the unique claim key for ongoing bounties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Withdrawal {
    pub issue_id: String,
    pub issue_url: String,
    pub claimant: String,
    pub claimant_asset: String,
    pub tier: Option<u64>,
}

/// Resolve whether the authenticated caller may withdraw the bounty
/// posted against `issue_url`.
///
/// Fetches issue data and viewer identity, then scans the timeline
/// per the eligibility predicate. Produces exactly one terminal
/// outcome; inputs are never mutated, so resolving twice against
/// unchanged upstream state yields an identical result.
pub fn check_withdrawal_eligibility(
    timeline_source: &dyn IssueTimelineSource,
    viewer_source: &dyn ViewerIdentitySource,
    ledger: &dyn LedgerContract,
    issue_url: &str,
    payout_address: &str,
) -> Result<Withdrawal, WithdrawalError> {
    // Both reads must complete before eligibility logic proceeds.
    let timeline = timeline_source
        .fetch(issue_url)
        .map_err(|err| map_timeline_error(err, issue_url))?;
    let viewer = viewer_source
        .viewer_login()
        .map_err(|err| map_viewer_error(err, issue_url))?;

    resolve_timeline(&timeline, &viewer, ledger, payout_address)
}

/// The scan itself, split out so fixture-backed callers can resolve
/// an already-fetched timeline.
pub fn resolve_timeline(
    timeline: &IssueTimeline,
    viewer: &str,
    ledger: &dyn LedgerContract,
    payout_address: &str,
) -> Result<Withdrawal, WithdrawalError> {
    let issue = &timeline.issue;

    let mut referenced: Vec<String> = Vec::new();
    let mut claimed_assets: Vec<String> = Vec::new();
    let mut claimed_tiers: Vec<(String, u64)> = Vec::new();
    let mut winner: Option<(&PullRequestCandidate, Option<u64>)> = None;

    for event in &timeline.events {
        let Some(candidate) = event.pull_request() else {
            continue;
        };
        referenced.push(candidate.url.clone());

        let text = text_at_merge_time(candidate);
        let closers = closer_issue_numbers(
            &text,
            &candidate.base_repository_owner,
            &candidate.base_repository_name,
        );
        // Placement markers are 1-indexed in text; contract state is
        // zero-indexed. Decrement exactly once, here.
        let tier = tier_placement(&text).map(|place| place - 1);

        let eligible = candidate.merged
            && viewer == candidate.author
            && candidate.base_repository_owner == issue.repository_owner
            && closers.contains(&issue.number);

        tracing::debug!(
            pull_request = %candidate.url,
            merged = candidate.merged,
            author = %candidate.author,
            eligible,
            ?tier,
            "scanned candidate"
        );

        if !eligible {
            continue;
        }

        match ledger
            .bounty_type(&issue.id)
            .map_err(|err| unknown(&err))?
        {
            BountyType::Ongoing => {
                if ledger
                    .ongoing_claimed(&issue.id, viewer, &candidate.url)
                    .map_err(|err| unknown(&err))?
                {
                    claimed_assets.push(candidate.url.clone());
                    continue;
                }
                winner = Some((candidate, tier));
                break;
            }
            BountyType::Tiered => {
                // A tiered bounty pays a declared placement; a
                // candidate without one is not withdrawable.
                let Some(tier_value) = tier else {
                    continue;
                };
                if ledger
                    .tier_claimed(&issue.id, tier_value)
                    .map_err(|err| unknown(&err))?
                {
                    claimed_tiers.push((candidate.url.clone(), tier_value));
                    continue;
                }
                winner = Some((candidate, tier));
                break;
            }
            BountyType::Single | BountyType::Competition => {
                winner = Some((candidate, tier));
                break;
            }
        }
    }

    if let Some((candidate, tier)) = winner {
        tracing::info!(
            issue_id = %issue.id,
            pull_request = %candidate.url,
            claimant = %viewer,
            ?tier,
            "withdrawal eligible"
        );
        return Ok(Withdrawal {
            issue_id: issue.id.clone(),
            issue_url: issue.url.clone(),
            claimant: viewer.to_string(),
            claimant_asset: candidate.url.clone(),
            tier,
        });
    }

    if referenced.is_empty() {
        return Err(WithdrawalError::NoPullRequestsReferenceIssue {
            issue_id: issue.id.clone(),
        });
    }

    if let Some(asset) = claimed_assets.first() {
        return Err(WithdrawalError::OngoingAlreadyClaimed {
            issue_url: issue.url.clone(),
            payout_address: payout_address.to_string(),
            claimant: viewer.to_string(),
            claimant_asset: asset.clone(),
        });
    }

    if let Some((asset, tier)) = claimed_tiers.first() {
        return Err(WithdrawalError::TierAlreadyClaimed {
            issue_url: issue.url.clone(),
            payout_address: payout_address.to_string(),
            claimant: viewer.to_string(),
            claimant_asset: asset.clone(),
            tier: *tier,
        });
    }

    Err(WithdrawalError::NoWithdrawablePrFound {
        issue_id: issue.id.clone(),
        referenced_prs: referenced,
    })
}

/// Body plus every comment, each reconstructed at merge time, joined
/// with the extraction delimiter.
fn text_at_merge_time(candidate: &PullRequestCandidate) -> String {
    let mut sections = Vec::with_capacity(candidate.comments.len() + 1);
    // The pull-request body has no creation revision of its own; it is
    // anchored to the pull request's creation time.
    sections.push(content_at_merge(
        candidate.merged,
        candidate.merged_at,
        &candidate.body_text,
        &candidate.body_edits,
        candidate.created_at,
    ));
    for comment in &candidate.comments {
        sections.push(content_at_merge(
            candidate.merged,
            candidate.merged_at,
            &comment.body_text,
            &comment.edits,
            comment.created_at,
        ));
    }
    sections.join(TEXT_JOIN_DELIMITER)
}

fn map_timeline_error(err: SourceError, issue_url: &str) -> WithdrawalError {
    match err {
        SourceError::NotFound => WithdrawalError::IssueDoesNotExist {
            issue_url: issue_url.to_string(),
        },
        SourceError::RateLimited => WithdrawalError::RateLimitedPat {
            issue_url: issue_url.to_string(),
        },
        SourceError::Unauthorized => WithdrawalError::OauthTokenLacksPrivileges {
            issue_url: issue_url.to_string(),
        },
        other => unknown(&other),
    }
}

fn map_viewer_error(err: SourceError, issue_url: &str) -> WithdrawalError {
    match err {
        SourceError::RateLimited => WithdrawalError::RateLimited {
            issue_url: issue_url.to_string(),
        },
        SourceError::Unauthorized => WithdrawalError::OauthTokenLacksPrivileges {
            issue_url: issue_url.to_string(),
        },
        other => unknown(&other),
    }
}

fn unknown(err: &dyn std::error::Error) -> WithdrawalError {
    WithdrawalError::Unknown {
        message: err.to_string(),
    }
}
