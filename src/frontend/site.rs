//! Site detection and cross-site linking.
//!
//! # Responsibilities
//! - Map a request host onto a configured site (once per request, before routing)
//! - Carry the detected site through `RouteParameters`
//! - Add scheme/host/port constraints when a link targets another site

use crate::config::schema::SiteConfig;
use crate::document::{CrossSiteLinker, NodeInfo};
use crate::routing::constraints::UriConstraints;
use crate::routing::context::RouteParameters;

/// The site a request belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDetectionResult {
    pub site_node_name: String,
}

impl SiteDetectionResult {
    pub const PARAMETER: &'static str = "siteNodeName";

    pub fn new(site_node_name: impl Into<String>) -> Self {
        Self {
            site_node_name: site_node_name.into(),
        }
    }

    pub fn from_route_parameters(parameters: &RouteParameters) -> Option<Self> {
        parameters.get(Self::PARAMETER).map(Self::new)
    }

    pub fn store_in(&self, parameters: RouteParameters) -> RouteParameters {
        parameters.with_parameter(Self::PARAMETER, self.site_node_name.clone())
    }
}

/// All configured sites.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<SiteConfig>,
}

impl SiteRegistry {
    pub fn new(sites: Vec<SiteConfig>) -> Self {
        Self { sites }
    }

    pub fn sites(&self) -> &[SiteConfig] {
        &self.sites
    }

    pub fn site(&self, node_name: &str) -> Option<&SiteConfig> {
        self.sites.iter().find(|s| s.node_name == node_name)
    }

    /// Exact host match first, then subdomains of a configured host, then
    /// the first configured site.
    pub fn detect(&self, host: Option<&str>) -> Option<SiteDetectionResult> {
        let host = host.map(|h| h.split(':').next().unwrap_or_default().to_lowercase());
        let matches = |site: &&SiteConfig, subdomain: bool| {
            let Some(host) = host.as_deref() else {
                return false;
            };
            site.hosts.iter().any(|configured| {
                let configured = configured.to_lowercase();
                host == configured || (subdomain && host.ends_with(&format!(".{configured}")))
            })
        };

        self.sites
            .iter()
            .find(|site| matches(site, false))
            .or_else(|| self.sites.iter().find(|site| matches(site, true)))
            .or_else(|| self.sites.first())
            .map(|site| SiteDetectionResult::new(site.node_name.clone()))
    }

    /// Route parameters for a request arriving at `host`.
    pub fn route_parameters(&self, host: Option<&str>) -> RouteParameters {
        let mut parameters = RouteParameters::new();
        if let Some(host) = host {
            parameters = parameters.with_parameter(RouteParameters::REQUEST_HOST, host);
        }
        match self.detect(host) {
            Some(site) => site.store_in(parameters),
            None => parameters,
        }
    }
}

impl CrossSiteLinker for SiteRegistry {
    fn create_cross_site_link(
        &self,
        target: &NodeInfo,
        current: &SiteDetectionResult,
    ) -> UriConstraints {
        if target.site_node_name == current.site_node_name {
            return UriConstraints::new();
        }
        let Some(site) = self.site(&target.site_node_name) else {
            tracing::warn!(site = %target.site_node_name, "Link target belongs to an unknown site");
            return UriConstraints::new();
        };
        let Some(host) = site.primary_host.as_ref().or_else(|| site.hosts.first()) else {
            return UriConstraints::new();
        };

        let mut constraints = UriConstraints::new()
            .with_scheme(site.scheme.clone())
            .with_host(host.clone());
        if let Some(port) = site.port {
            constraints = constraints.with_port(port);
        }
        constraints
    }
}
