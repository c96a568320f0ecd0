//! Normalized issue-timeline data model.
//!
//! Raw remote payloads are validated once at the wire boundary and
//! everything downstream consumes these types. Timeline order is the
//! remote feed's native chronological order; the resolver never
//! re-sorts it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue identity, fetched once per resolution call and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Opaque remote node id (the key bounties are minted against).
    pub id: String,
    /// Numeric display number, unique within the repository.
    pub number: u64,
    pub repository_owner: String,
    pub repository_name: String,
    pub url: String,
}

/// One ordered activity-feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// Another issue or pull request mentioned this issue.
    CrossReferenced { source: ReferenceSource },
    /// Any event the resolver does not care about.
    Other,
}

/// Origin of a cross-reference. Only pull requests can qualify for a
/// claim; issue-to-issue mentions never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReferenceSource {
    PullRequest(PullRequestCandidate),
    Other,
}

/// Normalized view of a referencing pull request, owned by the
/// resolver for the duration of one resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestCandidate {
    pub url: String,
    pub author: String,
    pub merged: bool,
    pub merged_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub base_repository_owner: String,
    pub base_repository_name: String,
    #[serde(default)]
    pub body_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_edits: Vec<EditRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<CandidateComment>,
}

/// One pull-request comment with its own edit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateComment {
    #[serde(default)]
    pub body_text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edits: Vec<EditRecord>,
}

/// A single content revision.
///
/// Lists are chronological, oldest first. For a field that has been
/// edited, the oldest record carries the original creation content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRecord {
    pub edited_at: DateTime<Utc>,
    pub text: String,
}

/// Everything the resolver needs from the remote issue tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTimeline {
    pub issue: Issue,
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

impl TimelineEvent {
    /// Classifier: a timeline event qualifies only when it is a
    /// cross-reference originating from a pull request.
    pub fn pull_request(&self) -> Option<&PullRequestCandidate> {
        match self {
            Self::CrossReferenced {
                source: ReferenceSource::PullRequest(candidate),
            } => Some(candidate),
            _ => None,
        }
    }
}
