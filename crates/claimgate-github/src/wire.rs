//! Tolerant decoding of GraphQL responses into the core timeline model.
//!
//! Payload shapes from the remote API are dynamic; they are validated
//! exactly once here. A timeline node that is not a pull-request
//! cross-reference, or that is missing a required field, decodes to a
//! non-qualifying event rather than failing the whole response.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use claimgate_core::{
    CandidateComment, EditRecord, Issue, IssueTimeline, PullRequestCandidate, ReferenceSource,
    SourceError, TimelineEvent,
};

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlEnvelope {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueResource {
    id: String,
    number: u64,
    url: String,
    repository: RepositoryNode,
    #[serde(default)]
    timeline_items: ConnectionNodes,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    name: String,
    owner: ActorNode,
}

#[derive(Debug, Deserialize)]
struct ActorNode {
    login: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConnectionNodes {
    #[serde(default)]
    nodes: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestNode {
    #[serde(rename = "__typename", default)]
    typename: String,
    url: String,
    merged: bool,
    merged_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    author: Option<ActorNode>,
    base_repository: Option<RepositoryNode>,
    #[serde(default)]
    body_text: String,
    #[serde(default)]
    user_content_edits: EditConnection,
    #[serde(default)]
    comments: CommentConnection,
}

#[derive(Debug, Default, Deserialize)]
struct EditConnection {
    #[serde(default)]
    edges: Vec<EditEdge>,
}

#[derive(Debug, Deserialize)]
struct EditEdge {
    node: EditNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditNode {
    created_at: DateTime<Utc>,
    #[serde(default)]
    diff: String,
}

#[derive(Debug, Default, Deserialize)]
struct CommentConnection {
    #[serde(default)]
    edges: Vec<CommentEdge>,
}

#[derive(Debug, Deserialize)]
struct CommentEdge {
    node: CommentNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentNode {
    #[serde(default)]
    body_text: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    user_content_edits: EditConnection,
}

/// Decode the issue-reference response into the normalized timeline.
///
/// `data.resource` must be an issue. A null or missing resource means
/// the issue does not exist; a resource of the wrong shape is a decode
/// failure, because the resolver cannot proceed without issue identity.
pub fn decode_issue_timeline(data: &Value) -> Result<IssueTimeline, SourceError> {
    let resource = data.get("resource").filter(|value| !value.is_null()).ok_or(
        SourceError::NotFound,
    )?;
    let resource: IssueResource = serde_json::from_value(resource.clone())
        .map_err(|err| SourceError::Decode(format!("issue resource: {err}")))?;

    let events = resource
        .timeline_items
        .nodes
        .iter()
        .map(decode_timeline_node)
        .collect();

    Ok(IssueTimeline {
        issue: Issue {
            id: resource.id,
            number: resource.number,
            repository_owner: resource.repository.owner.login,
            repository_name: resource.repository.name,
            url: resource.url,
        },
        events,
    })
}

/// Decode the viewer-identity response.
pub fn decode_viewer_login(data: &Value) -> Result<String, SourceError> {
    data.pointer("/viewer/login")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SourceError::Decode("viewer login missing".to_string()))
}

/// Classifier boundary: one timeline node to one normalized event.
///
/// Missing or malformed required fields make the event non-qualifying,
/// never fatal.
fn decode_timeline_node(node: &Value) -> TimelineEvent {
    let Some(source) = node.get("source").filter(|value| !value.is_null()) else {
        return TimelineEvent::Other;
    };

    let candidate = match serde_json::from_value::<PullRequestNode>(source.clone()) {
        Ok(node) if node.typename == "PullRequest" => node,
        Ok(_) => {
            return TimelineEvent::CrossReferenced {
                source: ReferenceSource::Other,
            };
        }
        Err(err) => {
            tracing::debug!(%err, "cross-reference source did not normalize; skipping");
            return TimelineEvent::CrossReferenced {
                source: ReferenceSource::Other,
            };
        }
    };

    let (Some(author), Some(base_repository)) = (candidate.author, candidate.base_repository)
    else {
        tracing::debug!(
            pull_request = %candidate.url,
            "pull request missing author or base repository; skipping"
        );
        return TimelineEvent::CrossReferenced {
            source: ReferenceSource::Other,
        };
    };

    TimelineEvent::CrossReferenced {
        source: ReferenceSource::PullRequest(PullRequestCandidate {
            url: candidate.url,
            author: author.login,
            merged: candidate.merged,
            merged_at: candidate.merged_at,
            created_at: candidate.created_at,
            base_repository_owner: base_repository.owner.login,
            base_repository_name: base_repository.name,
            body_text: candidate.body_text,
            body_edits: normalize_edits(candidate.user_content_edits),
            comments: candidate
                .comments
                .edges
                .into_iter()
                .map(|edge| CandidateComment {
                    body_text: edge.node.body_text,
                    created_at: edge.node.created_at,
                    edits: normalize_edits(edge.node.user_content_edits),
                })
                .collect(),
        }),
    }
}

/// The remote returns edit history newest-first; the core model wants
/// chronological oldest-first.
fn normalize_edits(connection: EditConnection) -> Vec<EditRecord> {
    let mut edits: Vec<EditRecord> = connection
        .edges
        .into_iter()
        .map(|edge| EditRecord {
            edited_at: edge.node.created_at,
            text: edge.node.diff,
        })
        .collect();
    edits.sort_by_key(|edit| edit.edited_at);
    edits
}
