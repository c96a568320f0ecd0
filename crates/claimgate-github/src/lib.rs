//! # claimgate-github
//!
//! GitHub GraphQL wire layer.
//!
//! This crate is intentionally thin: it owns the query documents, the
//! tolerant decoding of GraphQL responses into the core timeline
//! model, and the classification of remote failures into the source
//! error classes the resolver distinguishes. The byte transport itself
//! stays behind [`transport::GraphQlTransport`].

pub mod client;
pub mod query;
pub mod token;
pub mod transport;
pub mod wire;

pub use client::GithubGraphQl;
pub use query::{GET_ISSUE_PR_REFERENCE_DATA, GET_VIEWER};
pub use token::{AUTH_HEADER, extract_signed_token, sign_token, verify_signed_token};
pub use transport::{GraphQlTransport, TransportError};
