//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Build dimension source, resolver chain, document store and sites in
//!   dependency order
//! - Assemble the route part handler the HTTP layer and CLI share
//!
//! # Design Decisions
//! - Fail fast: any configuration error is fatal at startup and rejected on reload
//! - A `RoutingRuntime` is immutable; reloads build a new one and swap it in

use std::path::Path;
use std::sync::Arc;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::RouterConfig;
use crate::dimension::{ConfiguredDimensionSource, ContentDimension, DimensionSpacePoint};
use crate::document::InMemoryDocumentStore;
use crate::frontend::{
    FrontendRoutePartHandler, HandlerOptions, MatchOutcome, ResolveOutcome, RouteValue,
    RouteValues, RoutingError, SiteRegistry,
};
use crate::observability::metrics;
use crate::routing::chain::DelegatingResolver;
use crate::routing::error::ConfigurationError;
use crate::routing::host_prefix::{HostPrefixMapping, HostPrefixResolver};
use crate::routing::path_resolver::UriPathResolver;
use crate::routing::resolver::DimensionResolver;
use crate::routing::segment::{Segment, SegmentMappingElement, Segments, Separator};

/// Everything needed to match and resolve requests for one configuration.
pub struct RoutingRuntime {
    config: RouterConfig,
    handler: FrontendRoutePartHandler,
    sites: Arc<SiteRegistry>,
    uri_path_resolver: Option<Arc<UriPathResolver>>,
}

impl RoutingRuntime {
    /// Build all routing components from a validated configuration.
    pub fn build(config: RouterConfig) -> Result<Self, ConfigurationError> {
        let dimensions = ConfiguredDimensionSource::new(
            config
                .dimensions
                .iter()
                .map(|d| ContentDimension::new(d.id.clone(), d.values.iter().cloned()))
                .collect(),
        );
        let default_point = DimensionSpacePoint::new(config.default_dimension_space_point.clone());

        let mut resolvers: Vec<Arc<dyn DimensionResolver>> = Vec::new();
        let mut uri_path_resolver = None;
        for name in &config.routing.resolvers {
            match name.as_str() {
                "uri_path" => {
                    let resolver = Arc::new(UriPathResolver::create(
                        segments_from_config(&config),
                        Separator::new(&config.routing.separator)?,
                        &dimensions,
                        &default_point,
                    )?);
                    metrics::record_table_entries(resolver.len());
                    uri_path_resolver = Some(resolver.clone());
                    resolvers.push(resolver);
                }
                "host_prefix" => {
                    let mappings = config
                        .host_prefixes
                        .iter()
                        .map(|h| HostPrefixMapping {
                            prefix: h.prefix.clone(),
                            point: DimensionSpacePoint::new(h.coordinates.clone()),
                        })
                        .collect();
                    resolvers.push(Arc::new(HostPrefixResolver::create(mappings, &dimensions)?));
                }
                other => return Err(ConfigurationError::UnknownResolver(other.to_string())),
            }
        }

        let store = Arc::new(InMemoryDocumentStore::from_config(
            &config.documents,
            config.routing.live_content_stream_id.clone(),
        )?);
        let sites = Arc::new(SiteRegistry::new(config.sites.clone()));

        let options = HandlerOptions {
            name: config.routing.route_part_name.clone(),
            uri_suffix: non_empty(&config.routing.uri_suffix),
            split_string: non_empty(&config.routing.split_string),
            fallback_point: default_point,
        };
        let handler = FrontendRoutePartHandler::new(
            Arc::new(DelegatingResolver::new(resolvers)),
            store.clone(),
            store,
            sites.clone(),
            options,
        );

        tracing::info!(
            resolvers = ?config.routing.resolvers,
            documents = config.documents.len(),
            sites = config.sites.len(),
            "Routing runtime built"
        );

        Ok(Self {
            config,
            handler,
            sites,
            uri_path_resolver,
        })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn handler(&self) -> &FrontendRoutePartHandler {
        &self.handler
    }

    pub fn sites(&self) -> &SiteRegistry {
        &self.sites
    }

    /// The URI path resolver, when it is part of the chain.
    pub fn uri_path_resolver(&self) -> Option<&UriPathResolver> {
        self.uri_path_resolver.as_deref()
    }

    /// Match `path` as requested on `host`.
    pub fn match_request(
        &self,
        host: Option<&str>,
        path: &str,
    ) -> Result<MatchOutcome, RoutingError> {
        let parameters = self.sites.route_parameters(host);
        self.handler.for_request().match_path(path, &parameters)
    }

    /// Resolve a serialized content address for a link rendered on `host`.
    pub fn resolve_token(
        &self,
        host: Option<&str>,
        token: &str,
    ) -> Result<ResolveOutcome, RoutingError> {
        let parameters = self.sites.route_parameters(host);
        let mut values = RouteValues::new();
        values.insert(
            self.handler.options().name.clone(),
            RouteValue::Text(token.to_string()),
        );
        self.handler.for_request().resolve(&values, &parameters)
    }
}

/// Load, validate and build in one step.
pub fn load_runtime(path: &Path) -> Result<RoutingRuntime, ConfigError> {
    let config = load_config(path)?;
    Ok(RoutingRuntime::build(config)?)
}

fn segments_from_config(config: &RouterConfig) -> Segments {
    Segments::new(
        config
            .segments
            .iter()
            .map(|s| {
                Segment::new(
                    s.dimension.clone(),
                    s.mapping
                        .iter()
                        .map(|m| SegmentMappingElement::new(m.value.clone(), m.segment.clone()))
                        .collect(),
                )
            })
            .collect(),
    )
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
