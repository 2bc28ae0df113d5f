//! Frontend route part handler.
//!
//! # Responsibilities
//! - Match: request path → dimension space point → document → content address
//! - Resolve: content address → document → shortcut → URI path + constraints
//!
//! # Design Decisions
//! - Missing documents are `NoMatch`/`CannotResolve`, so other routes can try
//! - Collaborator failures propagate as `RoutingError`
//! - Stateless per request; holds only immutable shared collaborators

use std::sync::Arc;

use url::Url;

use crate::dimension::DimensionSpacePoint;
use crate::document::{
    CrossSiteLinker, DocumentLookup, MemoizedLookup, NodeInfo, ShortcutResolution, ShortcutResolver,
};
use crate::frontend::address::{ContentAddress, WorkspaceName};
use crate::frontend::result::{
    MatchOutcome, MatchResult, ResolveOutcome, ResolveResult, RouteValue, RouteValues, RoutingError,
};
use crate::frontend::site::SiteDetectionResult;
use crate::observability::metrics;
use crate::routing::chain::DelegatingResolver;
use crate::routing::constraints::UriConstraints;
use crate::routing::context::{ResolutionContext, RouteParameters};

/// Route part options.
#[derive(Debug, Clone)]
pub struct HandlerOptions {
    /// Route value key holding the content address.
    pub name: String,
    /// Appended to every non-root document path, e.g. `.html`.
    pub uri_suffix: Option<String>,
    /// Marks the end of this route part inside the request path.
    pub split_string: Option<String>,
    /// Completes coordinates the resolvers left unresolved.
    pub fallback_point: DimensionSpacePoint,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            name: "node".to_string(),
            uri_suffix: None,
            split_string: None,
            fallback_point: DimensionSpacePoint::empty(),
        }
    }
}

#[derive(Clone)]
pub struct FrontendRoutePartHandler {
    resolver: Arc<DelegatingResolver>,
    documents: Arc<dyn DocumentLookup>,
    shortcuts: Arc<dyn ShortcutResolver>,
    cross_site_linker: Arc<dyn CrossSiteLinker>,
    options: HandlerOptions,
}

impl FrontendRoutePartHandler {
    pub fn new(
        resolver: Arc<DelegatingResolver>,
        documents: Arc<dyn DocumentLookup>,
        shortcuts: Arc<dyn ShortcutResolver>,
        cross_site_linker: Arc<dyn CrossSiteLinker>,
        options: HandlerOptions,
    ) -> Self {
        Self {
            resolver,
            documents,
            shortcuts,
            cross_site_linker,
            options,
        }
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    /// A copy whose document lookups are memoized for one request.
    pub fn for_request(&self) -> Self {
        Self {
            documents: Arc::new(MemoizedLookup::new(self.documents.clone())),
            ..self.clone()
        }
    }

    /// Inbound: request path → content address.
    pub fn match_path(
        &self,
        request_path: &str,
        parameters: &RouteParameters,
    ) -> Result<MatchOutcome, RoutingError> {
        let (document_path, remaining_request_path, suffix_missing) =
            self.split_request_path(request_path);

        let context = self
            .resolver
            .resolve_dimension_space_point(ResolutionContext::new(document_path, parameters.clone()));
        let point = self.complete_point(context.resolved_point());

        let site = SiteDetectionResult::from_route_parameters(parameters)
            .ok_or(RoutingError::SiteNotDetected)?;
        let uri_path = context.remaining_uri_path().trim_matches('/');

        // Site roots render without the suffix; everything else must carry it.
        if suffix_missing && !uri_path.is_empty() {
            tracing::debug!(path = %request_path, "Request path lacks the configured URI suffix");
            metrics::record_match("no_match");
            return Ok(MatchOutcome::NoMatch);
        }

        let node = match self.documents.find(&site.site_node_name, uri_path, point.hash()) {
            Ok(Some(node)) => node,
            Ok(None) => {
                tracing::debug!(
                    site = %site.site_node_name,
                    uri_path = %uri_path,
                    point = %point,
                    "No document for request path"
                );
                metrics::record_match("no_match");
                return Ok(MatchOutcome::NoMatch);
            }
            Err(e) => {
                tracing::error!(error = %e, path = %request_path, "Document lookup failed");
                metrics::record_match("error");
                return Err(e.into());
            }
        };

        let address = ContentAddress::new(
            self.documents.live_content_stream_id()?,
            point,
            node.node_aggregate_id.clone(),
            WorkspaceName::live(),
        );
        tracing::debug!(path = %request_path, address = %address, "Request path matched");
        metrics::record_match("matched");

        Ok(MatchOutcome::Matched(MatchResult {
            matched_value: address.serialize_for_uri()?,
            tags: node.route_tags,
            remaining_request_path: remaining_request_path.to_string(),
        }))
    }

    /// Outbound: content address in `route_values` → URI path and constraints.
    pub fn resolve(
        &self,
        route_values: &RouteValues,
        parameters: &RouteParameters,
    ) -> Result<ResolveOutcome, RoutingError> {
        let address = match route_values.get(&self.options.name) {
            Some(RouteValue::Address(address)) => address.clone(),
            Some(RouteValue::Text(token)) => {
                match ContentAddress::parse(token, self.documents.live_content_stream_id()?) {
                    Ok(address) => address,
                    Err(e) => {
                        tracing::debug!(error = %e, "Route value is not a content address");
                        metrics::record_resolve("cannot_resolve");
                        return Ok(ResolveOutcome::CannotResolve);
                    }
                }
            }
            None => {
                metrics::record_resolve("cannot_resolve");
                return Ok(ResolveOutcome::CannotResolve);
            }
        };
        let current_site = SiteDetectionResult::from_route_parameters(parameters)
            .ok_or(RoutingError::SiteNotDetected)?;

        let outcome = self.resolve_address(&address, &current_site).inspect_err(|e| {
            tracing::error!(error = %e, address = %address, "Resolving content address failed");
            metrics::record_resolve("error");
        })?;
        match &outcome {
            ResolveOutcome::Resolved(result) => {
                tracing::debug!(address = %address, uri_path = %result.resolved_value, "Content address resolved");
                metrics::record_resolve("resolved");
            }
            ResolveOutcome::CannotResolve => metrics::record_resolve("cannot_resolve"),
        }
        Ok(outcome)
    }

    fn resolve_address(
        &self,
        address: &ContentAddress,
        current_site: &SiteDetectionResult,
    ) -> Result<ResolveOutcome, RoutingError> {
        let point_hash = address.dimension_space_point().hash();
        let Some(mut node) = self
            .documents
            .find_by_address(address.node_aggregate_id(), point_hash)?
        else {
            tracing::debug!(address = %address, "No document for content address");
            return Ok(ResolveOutcome::CannotResolve);
        };
        if node.is_disabled() {
            tracing::debug!(address = %address, "Document for content address is disabled");
            return Ok(ResolveOutcome::CannotResolve);
        }

        let mut address = address.clone();
        if node.is_shortcut() {
            match self.shortcuts.resolve_shortcut(&node)? {
                ShortcutResolution::External(uri) => {
                    return Ok(ResolveOutcome::Resolved(resolve_result_from_uri(&uri)));
                }
                ShortcutResolution::Node(target) => {
                    address = address.with_node_aggregate_id(target.node_aggregate_id.clone());
                    node = target;
                }
                ShortcutResolution::Invalid(reason) => {
                    tracing::warn!(address = %address, reason = %reason, "Invalid shortcut");
                    return Ok(ResolveOutcome::CannotResolve);
                }
            }
        }

        let constraints = self.cross_site_linker.create_cross_site_link(&node, current_site);
        let mut constraints =
            self.resolver
                .render_uri_constraints(address.dimension_space_point(), &node, constraints);

        if let Some(suffix) = self.options.uri_suffix.as_deref().filter(|s| !s.is_empty()) {
            if node.has_uri_path() {
                constraints = constraints.with_path_suffix(suffix);
            }
        }

        Ok(ResolveOutcome::Resolved(ResolveResult {
            resolved_value: node.uri_path.clone(),
            constraints,
            tags: node.route_tags.clone(),
        }))
    }

    /// Split off the suffix and the split-string remainder.
    ///
    /// Returns the document path, the remainder, and whether a configured
    /// suffix was missing.
    fn split_request_path<'a>(&self, request_path: &'a str) -> (&'a str, &'a str, bool) {
        let mut path = request_path;
        let mut suffix_missing = false;
        if let Some(suffix) = self.options.uri_suffix.as_deref().filter(|s| !s.is_empty()) {
            match path.find(suffix) {
                Some(position) => path = &path[..position],
                None => suffix_missing = true,
            }
        }

        match self.options.split_string.as_deref() {
            None | Some("") | Some("/") => (path, "", suffix_missing),
            Some(split) => match path.find(split) {
                Some(position) => (&path[..position], &path[position..], suffix_missing),
                None => (path, "", suffix_missing),
            },
        }
    }

    fn complete_point(&self, resolved: &DimensionSpacePoint) -> DimensionSpacePoint {
        let completed = self.options.fallback_point.with_coordinates(resolved);
        if completed != *resolved {
            tracing::debug!(resolved = %resolved, completed = %completed, "Completed unresolved dimensions with defaults");
        }
        completed
    }
}

/// Build a resolve result pointing at an external URI.
fn resolve_result_from_uri(uri: &Url) -> ResolveResult {
    let mut constraints = UriConstraints::new();
    let scheme = uri.scheme();
    if !scheme.is_empty() {
        constraints = constraints.with_scheme(scheme);
    }
    if let Some(host) = uri.host_str().filter(|h| !h.is_empty()) {
        constraints = constraints.with_host(host);
    }
    match uri.port() {
        Some(port) => constraints = constraints.with_port(port),
        None if !scheme.is_empty() => {
            constraints = constraints.with_port(if scheme == "https" { 443 } else { 80 });
        }
        None => {}
    }
    if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
        constraints = constraints.with_query_string(query);
    }
    if let Some(fragment) = uri.fragment().filter(|f| !f.is_empty()) {
        constraints = constraints.with_fragment(fragment);
    }

    ResolveResult {
        resolved_value: uri.path().to_string(),
        constraints,
        tags: Default::default(),
    }
}
