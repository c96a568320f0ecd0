//! Byte-transport boundary for the GraphQL API.
//!
//! Implementations own HTTP, TLS, and timeouts. The client only needs
//! one blocking POST per query and a distinguishable status code on
//! failure.

use serde_json::Value;

/// Errors from the underlying transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The remote answered with a non-success HTTP status.
    #[error("remote returned status {status}")]
    Status { status: u16 },

    #[error("transport failure: {0}")]
    Io(String),
}

/// One blocking GraphQL POST.
///
/// `bearer` is the credential for this specific query; the issue-data
/// and viewer-identity queries use different ones.
pub trait GraphQlTransport {
    fn post(&self, query: &str, variables: &Value, bearer: &str)
    -> Result<Value, TransportError>;
}
