//! GraphQL query documents.

/// Issue identity plus every cross-reference event, with enough
/// pull-request detail to reconstruct text at merge time: bodies,
/// comments, and their full edit histories.
pub const GET_ISSUE_PR_REFERENCE_DATA: &str = r#"
query GetIssuePrReferenceData($issueUrl: URI!) {
  resource(url: $issueUrl) {
    ... on Issue {
      id
      number
      url
      repository {
        name
        owner {
          login
        }
      }
      timelineItems(first: 100, itemTypes: [CROSS_REFERENCED_EVENT]) {
        nodes {
          ... on CrossReferencedEvent {
            source {
              ... on PullRequest {
                __typename
                url
                merged
                mergedAt
                createdAt
                author {
                  login
                }
                baseRepository {
                  name
                  owner {
                    login
                  }
                }
                bodyText
                userContentEdits(first: 100) {
                  edges {
                    node {
                      createdAt
                      diff
                    }
                  }
                }
                comments(first: 100) {
                  edges {
                    node {
                      bodyText
                      createdAt
                      userContentEdits(first: 100) {
                        edges {
                          node {
                            createdAt
                            diff
                          }
                        }
                      }
                    }
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// Login of the authenticated caller, issued with the claimant's own
/// oauth credential.
pub const GET_VIEWER: &str = r#"
query GetViewer {
  viewer {
    login
  }
}
"#;
