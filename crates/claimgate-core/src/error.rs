//! Terminal error taxonomy for withdrawal resolution.
//!
//! Every internal failure maps to exactly one of these before crossing
//! the crate boundary; no raw transport error escapes. All variants
//! are terminal; the core never retries.

use serde_json::{Value, json};

/// One typed rejection per failed resolution call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WithdrawalError {
    /// The timeline source reports the issue as not found.
    #[error("issue {issue_url} does not exist or is not visible to the issue-data credential")]
    IssueDoesNotExist { issue_url: String },

    /// Rate limiting on the issue-data credential.
    #[error("rate limited on the issue-data credential while fetching {issue_url}")]
    RateLimitedPat { issue_url: String },

    /// Rate limiting on the viewer-identity credential.
    #[error("rate limited on the viewer-identity credential while resolving {issue_url}")]
    RateLimited { issue_url: String },

    /// Upstream 401 on either credential.
    #[error("the oauth token lacks the privileges required to resolve {issue_url}")]
    OauthTokenLacksPrivileges { issue_url: String },

    #[error("no pull requests reference this issue")]
    NoPullRequestsReferenceIssue { issue_id: String },

    /// Pull requests reference the issue but none meets the claim
    /// criteria: merged, authored by the caller, merged into the
    /// issue's repository, and closing the issue at merge time.
    #[error(
        "no withdrawable pull request found; referencing pull requests that do not meet the claim criteria: {urls}",
        urls = referenced_prs.join(", ")
    )]
    NoWithdrawablePrFound {
        issue_id: String,
        referenced_prs: Vec<String>,
    },

    #[error("ongoing bounty for {issue_url} has already been claimed by {claimant} for {claimant_asset}")]
    OngoingAlreadyClaimed {
        issue_url: String,
        payout_address: String,
        claimant: String,
        claimant_asset: String,
    },

    /// `tier` is zero-indexed, matching contract state.
    #[error("tier {tier} of the bounty for {issue_url} has already been claimed (referencing pull request: {claimant_asset})")]
    TierAlreadyClaimed {
        issue_url: String,
        payout_address: String,
        claimant: String,
        claimant_asset: String,
        tier: u64,
    },

    /// The bounty's claim window is closed for its class: a single or
    /// ongoing bounty is no longer open, or a competition has not
    /// ended yet.
    #[error("bounty for {issue_url} is not claimable in its current state")]
    BountyIsClaimed {
        issue_url: String,
        payout_address: String,
    },

    #[error("ongoing bounty for {issue_url} has insufficient funds to pay out this withdrawal")]
    BountyIsInsolvent {
        issue_url: String,
        payout_address: String,
    },

    #[error("no signed oauth token was supplied with the request")]
    MissingOauthToken,

    #[error("the signed oauth token failed signature verification")]
    InvalidOauthTokenSignature,

    /// Catch-all wrapping the underlying failure for diagnostics.
    #[error("unknown error: {message}")]
    Unknown { message: String },
}

impl WithdrawalError {
    /// Stable machine-readable code for operators and API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::IssueDoesNotExist { .. } => "ISSUE_DOES_NOT_EXIST",
            Self::RateLimitedPat { .. } => "RATE_LIMITED_PAT",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::OauthTokenLacksPrivileges { .. } => "GITHUB_OAUTH_TOKEN_LACKS_PRIVILEGES",
            Self::NoPullRequestsReferenceIssue { .. } => "NO_PULL_REQUESTS_REFERENCE_ISSUE",
            Self::NoWithdrawablePrFound { .. } => "NO_WITHDRAWABLE_PR_FOUND",
            Self::OngoingAlreadyClaimed { .. } => "ONGOING_ALREADY_CLAIMED",
            Self::TierAlreadyClaimed { .. } => "TIER_ALREADY_CLAIMED",
            Self::BountyIsClaimed { .. } => "BOUNTY_IS_CLAIMED",
            Self::BountyIsInsolvent { .. } => "BOUNTY_IS_INSOLVENT",
            Self::MissingOauthToken => "MISSING_OAUTH_TOKEN",
            Self::InvalidOauthTokenSignature => "INVALID_OAUTH_TOKEN_SIGNATURE",
            Self::Unknown { .. } => "UNKNOWN_ERROR",
        }
    }

    /// Render the rejection for API/CLI consumers: code, message, and
    /// whatever context the variant carries.
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "can_withdraw": false,
            "type": self.code(),
            "error_message": self.to_string(),
        });
        let context = match self {
            Self::IssueDoesNotExist { issue_url }
            | Self::RateLimitedPat { issue_url }
            | Self::RateLimited { issue_url }
            | Self::OauthTokenLacksPrivileges { issue_url } => json!({ "issue_url": issue_url }),
            Self::NoPullRequestsReferenceIssue { issue_id } => json!({ "issue_id": issue_id }),
            Self::NoWithdrawablePrFound {
                issue_id,
                referenced_prs,
            } => json!({ "issue_id": issue_id, "referenced_prs": referenced_prs }),
            Self::OngoingAlreadyClaimed {
                issue_url,
                payout_address,
                claimant,
                claimant_asset,
            } => json!({
                "issue_url": issue_url,
                "payout_address": payout_address,
                "claimant": claimant,
                "claimant_asset": claimant_asset,
            }),
            Self::TierAlreadyClaimed {
                issue_url,
                payout_address,
                claimant,
                claimant_asset,
                tier,
            } => json!({
                "issue_url": issue_url,
                "payout_address": payout_address,
                "claimant": claimant,
                "claimant_asset": claimant_asset,
                "tier": tier,
            }),
            Self::BountyIsClaimed {
                issue_url,
                payout_address,
            }
            | Self::BountyIsInsolvent {
                issue_url,
                payout_address,
            } => json!({ "issue_url": issue_url, "payout_address": payout_address }),
            Self::MissingOauthToken | Self::InvalidOauthTokenSignature => json!({}),
            Self::Unknown { message } => json!({ "detail": message }),
        };
        if let (Some(body_map), Some(context_map)) = (body.as_object_mut(), context.as_object()) {
            for (key, value) in context_map {
                body_map.insert(key.clone(), value.clone());
            }
        }
        body
    }
}
