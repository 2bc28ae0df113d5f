//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration for the dimension router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route part options and resolver chain order.
    pub routing: RoutingConfig,

    /// Content dimensions and their legal values.
    pub dimensions: Vec<DimensionConfig>,

    /// Coordinates assumed when the URL does not select any.
    pub default_dimension_space_point: BTreeMap<String, String>,

    /// URI path segments, in URL order.
    pub segments: Vec<SegmentConfig>,

    /// Host prefixes for the `host_prefix` resolver.
    pub host_prefixes: Vec<HostPrefixConfig>,

    /// Sites and their hosts.
    pub sites: Vec<SiteConfig>,

    /// Documents served by the in-memory store.
    pub documents: Vec<DocumentConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Route part handler and resolver chain settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Route value key holding the content address.
    pub route_part_name: String,

    /// Joins the per-dimension URI path segments.
    pub separator: String,

    /// Suffix of every non-root document URL (e.g. ".html"); empty for none.
    pub uri_suffix: String,

    /// Marks the end of the document path; empty for none.
    pub split_string: String,

    /// Resolver chain, in order. Known: "uri_path", "host_prefix".
    pub resolvers: Vec<String>,

    /// Content stream of the live workspace.
    pub live_content_stream_id: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            route_part_name: "node".to_string(),
            separator: "_".to_string(),
            uri_suffix: String::new(),
            split_string: String::new(),
            resolvers: vec!["uri_path".to_string()],
            live_content_stream_id: "live".to_string(),
        }
    }
}

/// A content dimension.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DimensionConfig {
    pub id: String,
    pub values: Vec<String>,
}

/// URI path segment of one dimension.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SegmentConfig {
    pub dimension: String,
    #[serde(default)]
    pub mapping: Vec<SegmentMappingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SegmentMappingConfig {
    pub value: String,

    /// URL string for the value; empty means "no segment".
    #[serde(default)]
    pub segment: String,
}

/// First host label selecting a dimension space point.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostPrefixConfig {
    #[serde(default)]
    pub prefix: String,
    pub coordinates: BTreeMap<String, String>,
}

/// A site and the hosts it answers on.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    pub node_name: String,

    #[serde(default)]
    pub hosts: Vec<String>,

    /// Host used for links into this site; defaults to the first host.
    #[serde(default)]
    pub primary_host: Option<String>,

    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default)]
    pub port: Option<u16>,
}

fn default_scheme() -> String {
    "https".to_string()
}

/// A document node in one dimension space point.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentConfig {
    pub aggregate_id: String,
    pub site: String,

    /// Empty for the site root.
    #[serde(default)]
    pub uri_path: String,

    #[serde(default)]
    pub coordinates: BTreeMap<String, String>,

    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default)]
    pub disabled: bool,

    /// "first_child", "parent", "node://<id>" or an external URI.
    #[serde(default)]
    pub shortcut: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}
