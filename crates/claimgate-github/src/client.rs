//! GraphQL client implementing the resolver's source traits.
//!
//! Two credentials flow through one client: the service PAT fetches
//! issue data, the claimant's oauth token answers the identity query.
//! Failure classification is therefore per credential, and the
//! resolver maps the same `SourceError` class to different rejection
//! codes depending on which source raised it.

use serde_json::{Value, json};

use claimgate_core::{
    IssueTimeline, IssueTimelineSource, SourceError, ViewerIdentitySource,
};

use crate::query::{GET_ISSUE_PR_REFERENCE_DATA, GET_VIEWER};
use crate::transport::{GraphQlTransport, TransportError};
use crate::wire::{self, GraphQlEnvelope};

/// Client over a pluggable transport.
pub struct GithubGraphQl<T> {
    transport: T,
    pat: String,
    oauth_token: String,
}

impl<T: GraphQlTransport> GithubGraphQl<T> {
    pub fn new(transport: T, pat: impl Into<String>, oauth_token: impl Into<String>) -> Self {
        Self {
            transport,
            pat: pat.into(),
            oauth_token: oauth_token.into(),
        }
    }

    fn execute(&self, query: &str, variables: Value, bearer: &str) -> Result<Value, SourceError> {
        let raw = self
            .transport
            .post(query, &variables, bearer)
            .map_err(classify_transport)?;
        let envelope: GraphQlEnvelope = serde_json::from_value(raw)
            .map_err(|err| SourceError::Decode(format!("response envelope: {err}")))?;

        if let Some(err) = envelope.errors.first() {
            return Err(classify_graphql(err.kind.as_str(), err.message.as_str()));
        }
        envelope
            .data
            .ok_or_else(|| SourceError::Decode("response carried no data".to_string()))
    }
}

impl<T: GraphQlTransport> IssueTimelineSource for GithubGraphQl<T> {
    fn fetch(&self, issue_url: &str) -> Result<IssueTimeline, SourceError> {
        tracing::debug!(%issue_url, "fetching issue timeline");
        let data = self.execute(
            GET_ISSUE_PR_REFERENCE_DATA,
            json!({ "issueUrl": issue_url }),
            &self.pat,
        )?;
        wire::decode_issue_timeline(&data)
    }
}

impl<T: GraphQlTransport> ViewerIdentitySource for GithubGraphQl<T> {
    fn viewer_login(&self) -> Result<String, SourceError> {
        let data = self.execute(GET_VIEWER, json!({}), &self.oauth_token)?;
        wire::decode_viewer_login(&data)
    }
}

fn classify_transport(err: TransportError) -> SourceError {
    match err {
        TransportError::Status { status: 401 | 403 } => SourceError::Unauthorized,
        TransportError::Status { status: 429 } => SourceError::RateLimited,
        TransportError::Status { status } => {
            SourceError::Transport(format!("status {status}"))
        }
        TransportError::Io(detail) => SourceError::Transport(detail),
    }
}

fn classify_graphql(kind: &str, message: &str) -> SourceError {
    match kind {
        "NOT_FOUND" => SourceError::NotFound,
        "RATE_LIMITED" => SourceError::RateLimited,
        "FORBIDDEN" | "INSUFFICIENT_SCOPES" => SourceError::Unauthorized,
        _ => SourceError::Transport(format!("{kind}: {message}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    /// Canned transport recording the bearer used per query.
    struct FakeTransport {
        responses: RefCell<Vec<Result<Value, TransportError>>>,
        bearers: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        fn new(responses: Vec<Result<Value, TransportError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                bearers: RefCell::new(Vec::new()),
            }
        }
    }

    impl GraphQlTransport for FakeTransport {
        fn post(
            &self,
            _query: &str,
            _variables: &Value,
            bearer: &str,
        ) -> Result<Value, TransportError> {
            self.bearers.borrow_mut().push(bearer.to_string());
            self.responses.borrow_mut().remove(0)
        }
    }

    #[test]
    fn identity_query_uses_the_oauth_credential() {
        let transport = FakeTransport::new(vec![Ok(json!({
            "data": { "viewer": { "login": "octocat" } }
        }))]);
        let client = GithubGraphQl::new(transport, "pat-secret", "oauth-secret");
        assert_eq!(client.viewer_login().unwrap(), "octocat");
        assert_eq!(
            client.transport.bearers.borrow().as_slice(),
            ["oauth-secret"]
        );
    }

    #[test]
    fn timeline_query_uses_the_pat() {
        let transport = FakeTransport::new(vec![Ok(json!({
            "data": { "resource": null }
        }))]);
        let client = GithubGraphQl::new(transport, "pat-secret", "oauth-secret");
        let err = client
            .fetch("https://github.com/acme/widgets/issues/1")
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound));
        assert_eq!(client.transport.bearers.borrow().as_slice(), ["pat-secret"]);
    }

    #[test]
    fn graphql_error_entries_classify_by_kind() {
        for (kind, expected_rate_limited, expected_not_found) in [
            ("RATE_LIMITED", true, false),
            ("NOT_FOUND", false, true),
        ] {
            let transport = FakeTransport::new(vec![Ok(json!({
                "data": null,
                "errors": [{ "type": kind, "message": "nope" }]
            }))]);
            let client = GithubGraphQl::new(transport, "p", "o");
            let err = client
                .fetch("https://github.com/acme/widgets/issues/1")
                .unwrap_err();
            assert_eq!(matches!(err, SourceError::RateLimited), expected_rate_limited);
            assert_eq!(matches!(err, SourceError::NotFound), expected_not_found);
        }
    }

    #[test]
    fn http_401_classifies_as_unauthorized() {
        let transport =
            FakeTransport::new(vec![Err(TransportError::Status { status: 401 })]);
        let client = GithubGraphQl::new(transport, "p", "o");
        assert!(matches!(
            client.viewer_login().unwrap_err(),
            SourceError::Unauthorized
        ));
    }

    #[test]
    fn unexpected_graphql_error_is_a_transport_failure() {
        let transport = FakeTransport::new(vec![Ok(json!({
            "errors": [{ "type": "SERVICE_UNAVAILABLE", "message": "try later" }]
        }))]);
        let client = GithubGraphQl::new(transport, "p", "o");
        match client.viewer_login().unwrap_err() {
            SourceError::Transport(detail) => assert!(detail.contains("SERVICE_UNAVAILABLE")),
            other => panic!("unexpected classification: {other:?}"),
        }
    }
}
