//! Collaborator contracts consumed by the route part handler.
//!
//! `Ok(None)` means "not found" and is an ordinary negative outcome.
//! `Err(LookupError)` means the lookup itself failed and must propagate.

use thiserror::Error;
use url::Url;

use crate::document::node::NodeInfo;
use crate::frontend::site::SiteDetectionResult;
use crate::routing::constraints::UriConstraints;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("document lookup failed: {0}")]
    Backend(String),
}

/// Finds document nodes by URL or by address.
pub trait DocumentLookup: Send + Sync {
    /// Enabled document at `uri_path` (no surrounding slashes) of a site.
    fn find(
        &self,
        site_node_name: &str,
        uri_path: &str,
        dimension_space_point_hash: &str,
    ) -> Result<Option<NodeInfo>, LookupError>;

    /// Document by aggregate id, including disabled ones.
    fn find_by_address(
        &self,
        node_aggregate_id: &str,
        dimension_space_point_hash: &str,
    ) -> Result<Option<NodeInfo>, LookupError>;

    /// Content stream backing the live workspace.
    fn live_content_stream_id(&self) -> Result<String, LookupError>;
}

/// Result of following a shortcut node.
#[derive(Debug, Clone, PartialEq)]
pub enum ShortcutResolution {
    Node(NodeInfo),
    External(Url),
    /// Broken shortcut (missing target, cycle); treated as "cannot resolve".
    Invalid(String),
}

pub trait ShortcutResolver: Send + Sync {
    fn resolve_shortcut(&self, node: &NodeInfo) -> Result<ShortcutResolution, LookupError>;
}

/// Adds host/scheme constraints when linking into another site.
pub trait CrossSiteLinker: Send + Sync {
    fn create_cross_site_link(
        &self,
        target: &NodeInfo,
        current: &SiteDetectionResult,
    ) -> UriConstraints;
}
