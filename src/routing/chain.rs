//! Resolver chain.
//!
//! Runs every configured strategy in order, threading the context (inbound)
//! or the constraints (outbound) from one strategy to the next. Both
//! directions use the same order so that rendering and parsing compose to
//! inverses of each other.

use std::sync::Arc;

use crate::dimension::DimensionSpacePoint;
use crate::document::NodeInfo;
use crate::routing::constraints::UriConstraints;
use crate::routing::context::ResolutionContext;
use crate::routing::resolver::DimensionResolver;

#[derive(Debug, Clone, Default)]
pub struct DelegatingResolver {
    resolvers: Vec<Arc<dyn DimensionResolver>>,
}

impl DelegatingResolver {
    pub fn new(resolvers: Vec<Arc<dyn DimensionResolver>>) -> Self {
        Self { resolvers }
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub fn resolve_dimension_space_point(&self, context: ResolutionContext) -> ResolutionContext {
        self.resolvers
            .iter()
            .fold(context, |context, resolver| resolver.resolve(context))
    }

    pub fn render_uri_constraints(
        &self,
        point: &DimensionSpacePoint,
        target: &NodeInfo,
        constraints: UriConstraints,
    ) -> UriConstraints {
        self.resolvers.iter().fold(constraints, |constraints, resolver| {
            resolver.render_uri_constraints(point, target, constraints)
        })
    }
}
