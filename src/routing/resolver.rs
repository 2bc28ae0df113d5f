//! Dimension resolver strategy contract.

use std::fmt::Debug;

use crate::dimension::DimensionSpacePoint;
use crate::document::NodeInfo;
use crate::routing::constraints::UriConstraints;
use crate::routing::context::ResolutionContext;

/// One strategy in the resolver chain.
///
/// Both directions must be inverses of each other for the coordinates the
/// strategy manages: rendering a matched point and matching the rendered URL
/// again yields the same point.
pub trait DimensionResolver: Send + Sync + Debug {
    /// Inbound: may consume part of the remaining path and add coordinates.
    fn resolve(&self, context: ResolutionContext) -> ResolutionContext;

    /// Outbound: add constraints rendering `point` for the `target` document.
    fn render_uri_constraints(
        &self,
        point: &DimensionSpacePoint,
        target: &NodeInfo,
        constraints: UriConstraints,
    ) -> UriConstraints;
}
