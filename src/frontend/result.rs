//! Match and resolve results handed back to the enclosing router.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::document::{LookupError, RouteTags};
use crate::frontend::address::{AddressError, ContentAddress};
use crate::routing::constraints::UriConstraints;

/// Inbound result: the serialized content address plus cache tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matched_value: String,
    pub tags: RouteTags,
    /// Part of the request path after the split string, for later route parts.
    pub remaining_request_path: String,
}

/// Outbound result: the document URI path and constraints to merge into the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveResult {
    pub resolved_value: String,
    pub constraints: UriConstraints,
    pub tags: RouteTags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(MatchResult),
    /// Not an error: the router tries its next route.
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Resolved(ResolveResult),
    /// Not an error: the router tries its next route.
    CannotResolve,
}

/// A route value as supplied by link generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteValue {
    Address(ContentAddress),
    /// Free text; accepted when it parses as a content address token.
    Text(String),
}

pub type RouteValues = BTreeMap<String, RouteValue>;

/// Hard request-time failures. Negative outcomes are not errors.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("site detection did not run for this request")]
    SiteNotDetected,

    #[error("cannot serialize content address: {0}")]
    Address(#[from] AddressError),
}
