//! Host prefix based dimension resolver.
//!
//! Maps the first label of the request host onto dimension values
//! (`de.example.com` → `{language: de}`). An empty prefix stands for the bare
//! host. Rendering swaps the host prefix; it never touches the path.

use std::collections::{BTreeSet, HashMap};

use crate::dimension::{ContentDimensionSource, DimensionSpacePoint};
use crate::document::NodeInfo;
use crate::routing::constraints::UriConstraints;
use crate::routing::context::ResolutionContext;
use crate::routing::error::ConfigurationError;
use crate::routing::resolver::DimensionResolver;

/// One host prefix and the coordinates it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPrefixMapping {
    pub prefix: String,
    pub point: DimensionSpacePoint,
}

#[derive(Debug)]
pub struct HostPrefixResolver {
    prefix_to_point: HashMap<String, DimensionSpacePoint>,
    point_hash_to_prefix: HashMap<String, String>,
    /// Non-empty prefixes; any of them is stripped before adding a new one.
    known_prefixes: Vec<String>,
    /// Distinct dimension sets of the mappings, largest first.
    dimension_sets: Vec<BTreeSet<String>>,
}

impl HostPrefixResolver {
    pub fn create(
        mappings: Vec<HostPrefixMapping>,
        dimension_source: &dyn ContentDimensionSource,
    ) -> Result<Self, ConfigurationError> {
        let mut prefix_to_point = HashMap::new();
        let mut point_hash_to_prefix = HashMap::new();
        let mut known_prefixes = Vec::new();
        let mut dimension_sets: Vec<BTreeSet<String>> = Vec::new();

        for mapping in mappings {
            let mut dimensions = BTreeSet::new();
            for (dimension_id, value) in mapping.point.coordinates() {
                let dimension = dimension_source
                    .dimension(dimension_id)
                    .ok_or_else(|| ConfigurationError::UnknownDimension(dimension_id.clone()))?;
                if !dimension.has_value(value) {
                    return Err(ConfigurationError::UnknownDimensionValue {
                        dimension: dimension_id.clone(),
                        value: value.clone(),
                    });
                }
                dimensions.insert(dimension_id.clone());
            }

            if !dimension_sets.contains(&dimensions) {
                dimension_sets.push(dimensions);
            }

            let prefix = mapping.prefix.to_lowercase();
            if prefix_to_point.contains_key(&prefix) {
                return Err(ConfigurationError::DuplicateHostPrefix(prefix));
            }
            if !prefix.is_empty() {
                known_prefixes.push(prefix.clone());
            }
            point_hash_to_prefix
                .entry(mapping.point.hash().to_string())
                .or_insert_with(|| prefix.clone());
            prefix_to_point.insert(prefix, mapping.point);
        }

        dimension_sets.sort_by(|a, b| b.len().cmp(&a.len()));

        tracing::info!(prefixes = prefix_to_point.len(), "Host prefix resolver built");
        Ok(Self {
            prefix_to_point,
            point_hash_to_prefix,
            known_prefixes,
            dimension_sets,
        })
    }
}

impl DimensionResolver for HostPrefixResolver {
    fn resolve(&self, context: ResolutionContext) -> ResolutionContext {
        let host = context
            .route_parameters()
            .host()
            .map(|h| h.split(':').next().unwrap_or_default().to_lowercase());
        let Some(host) = host else {
            return context;
        };

        let label = host.split('.').next().unwrap_or_default();
        let point = self
            .prefix_to_point
            .get(label)
            .or_else(|| self.prefix_to_point.get(""));
        match point {
            Some(point) => context.with_added_dimension_space_point(point),
            None => context,
        }
    }

    fn render_uri_constraints(
        &self,
        point: &DimensionSpacePoint,
        _target: &NodeInfo,
        constraints: UriConstraints,
    ) -> UriConstraints {
        let prefix = self.dimension_sets.iter().find_map(|dimensions| {
            let reduced = point.reduced_to(dimensions.iter().map(String::as_str));
            self.point_hash_to_prefix.get(reduced.hash())
        });
        match prefix {
            Some(prefix) => constraints.with_host_prefix(prefix.clone(), self.known_prefixes.clone()),
            None => constraints,
        }
    }
}
