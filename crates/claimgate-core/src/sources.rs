//! Boundary traits for the remote issue tracker.
//!
//! The two sources use different credentials: issue data is read with
//! an operator-held access token, viewer identity with the claimant's
//! own oauth token. They fail independently and the resolver reports
//! which one failed.

use crate::timeline::IssueTimeline;

/// Failure classes a source must distinguish.
///
/// Anything the resolver cannot map onto a distinguishable class
/// arrives as `Transport` or `Decode` and surfaces as an unknown
/// error.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("resource not found")]
    NotFound,

    #[error("rate limited")]
    RateLimited,

    #[error("unauthorized")]
    Unauthorized,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

/// Issue data keyed by issue URL, read with the issue-data credential.
pub trait IssueTimelineSource {
    fn fetch(&self, issue_url: &str) -> Result<IssueTimeline, SourceError>;
}

/// The authenticated caller's login, read with the claimant's own
/// oauth credential.
pub trait ViewerIdentitySource {
    fn viewer_login(&self) -> Result<String, SourceError>;
}
