//! URI path segment based dimension resolver.
//!
//! Reads the first URL path component (`/SOMETHING/…`) and maps it onto
//! dimension values. Multiple dimensions share that component, joined by the
//! separator: `/de_at/about` → `{language: de, country: at}`.
//!
//! # Design Decisions
//! - All combinations are enumerated at build time; matching is one map lookup
//! - Collisions are configuration errors, never request-time errors
//! - Unknown combinations render as "no segment" instead of failing

use std::collections::HashMap;

use crate::dimension::{ContentDimensionSource, DimensionSpacePoint};
use crate::document::NodeInfo;
use crate::routing::constraints::UriConstraints;
use crate::routing::context::ResolutionContext;
use crate::routing::error::ConfigurationError;
use crate::routing::resolver::DimensionResolver;
use crate::routing::segment::{SegmentMappingElement, Segments, Separator};

#[derive(Debug)]
pub struct UriPathResolver {
    /// composed URI path segment -> point
    uri_path_to_point: HashMap<String, DimensionSpacePoint>,
    /// point hash -> composed URI path segment
    point_hash_to_uri_path: HashMap<String, String>,
    /// Forward table keys in build order, for listing.
    uri_paths: Vec<String>,
    segments: Segments,
    default_point: DimensionSpacePoint,
}

impl UriPathResolver {
    /// Validate the configuration and precompute both lookup tables.
    pub fn create(
        segments: Segments,
        separator: Separator,
        dimension_source: &dyn ContentDimensionSource,
        default_point: &DimensionSpacePoint,
    ) -> Result<Self, ConfigurationError> {
        Self::validate(&segments, separator, dimension_source)?;

        let mut uri_path_to_point: HashMap<String, DimensionSpacePoint> = HashMap::new();
        let mut point_hash_to_uri_path = HashMap::new();
        let mut uri_paths = Vec::new();

        for combination in cartesian(&segments) {
            let mut parts = Vec::with_capacity(combination.len());
            let mut coordinates = Vec::with_capacity(combination.len());
            for (dimension_id, element) in combination {
                if !element.uri_path_segment.is_empty() {
                    parts.push(element.uri_path_segment.as_str());
                }
                coordinates.push((dimension_id, element.dimension_value.as_str()));
            }

            let uri_path = parts.join(separator.to_string().as_str());
            let point = DimensionSpacePoint::from_pairs(coordinates);
            if let Some(existing) = uri_path_to_point.get(&uri_path) {
                return Err(ConfigurationError::DuplicateUriPathSegment {
                    segment: uri_path,
                    existing: existing.to_string(),
                    conflicting: point.to_string(),
                });
            }
            point_hash_to_uri_path.insert(point.hash().to_string(), uri_path.clone());
            uri_path_to_point.insert(uri_path.clone(), point);
            uri_paths.push(uri_path);
        }

        let default_point = default_point.reduced_to(segments.dimension_ids());
        tracing::info!(
            entries = uri_paths.len(),
            segments = segments.len(),
            separator = %separator,
            default = %default_point,
            "URI path resolver tables built"
        );

        Ok(Self {
            uri_path_to_point,
            point_hash_to_uri_path,
            uri_paths,
            segments,
            default_point,
        })
    }

    fn validate(
        segments: &Segments,
        separator: Separator,
        dimension_source: &dyn ContentDimensionSource,
    ) -> Result<(), ConfigurationError> {
        for segment in segments {
            let dimension = dimension_source
                .dimension(&segment.dimension_id)
                .ok_or_else(|| ConfigurationError::UnknownDimension(segment.dimension_id.clone()))?;

            for element in &segment.mapping {
                if !dimension.has_value(&element.dimension_value) {
                    return Err(ConfigurationError::UnknownDimensionValue {
                        dimension: segment.dimension_id.clone(),
                        value: element.dimension_value.clone(),
                    });
                }
                if element.uri_path_segment.contains(separator.as_char()) {
                    return Err(ConfigurationError::SeparatorInSegment {
                        segment: element.uri_path_segment.clone(),
                        value: element.dimension_value.clone(),
                        separator: separator.as_char(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Default point, reduced to the dimensions of this resolver.
    pub fn default_point(&self) -> &DimensionSpacePoint {
        &self.default_point
    }

    /// Number of entries in the forward table.
    pub fn len(&self) -> usize {
        self.uri_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uri_paths.is_empty()
    }

    /// Forward table entries in build order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &DimensionSpacePoint)> {
        self.uri_paths
            .iter()
            .filter_map(|path| self.uri_path_to_point.get(path).map(|p| (path.as_str(), p)))
    }

    pub fn point_for_uri_path(&self, uri_path: &str) -> Option<&DimensionSpacePoint> {
        self.uri_path_to_point.get(uri_path)
    }

    pub fn uri_path_for_point(&self, point: &DimensionSpacePoint) -> Option<&str> {
        self.point_hash_to_uri_path
            .get(point.hash())
            .map(String::as_str)
    }

    fn reduce(&self, point: &DimensionSpacePoint) -> DimensionSpacePoint {
        point.reduced_to(self.segments.dimension_ids())
    }
}

impl DimensionResolver for UriPathResolver {
    fn resolve(&self, context: ResolutionContext) -> ResolutionContext {
        let normalized = context.remaining_uri_path().trim_matches('/');
        let (first, rest) = match normalized.split_once('/') {
            Some((first, rest)) => (first, Some(rest)),
            None => (normalized, None),
        };

        if let Some(point) = self.uri_path_to_point.get(first) {
            // The default point must be reachable without a segment only.
            if rest.is_none() && *point == self.default_point {
                return context;
            }
            let remaining = format!("/{}", rest.unwrap_or_default());
            return context
                .with_remaining_uri_path(remaining)
                .with_added_dimension_space_point(point);
        }

        if let Some(point) = self.uri_path_to_point.get("") {
            return context.with_added_dimension_space_point(point);
        }

        if first.is_empty() {
            return context.with_added_dimension_space_point(&self.default_point);
        }

        tracing::debug!(
            segment = %first,
            "No dimension mapping for first URI path segment"
        );
        context
    }

    fn render_uri_constraints(
        &self,
        point: &DimensionSpacePoint,
        target: &NodeInfo,
        constraints: UriConstraints,
    ) -> UriConstraints {
        let point = self.reduce(point);

        if target.is_site_root() && point == self.default_point {
            return constraints;
        }

        match self.point_hash_to_uri_path.get(point.hash()) {
            Some(uri_path) if !uri_path.is_empty() => {
                constraints.with_path_prefix(format!("{uri_path}/"), true)
            }
            _ => constraints,
        }
    }
}

/// Cartesian product over all segments' mapping elements, in declaration order.
fn cartesian(segments: &Segments) -> Vec<Vec<(&str, &SegmentMappingElement)>> {
    let mut result: Vec<Vec<(&str, &SegmentMappingElement)>> = vec![Vec::new()];
    for segment in segments {
        let mut next = Vec::with_capacity(result.len() * segment.mapping.len());
        for product in &result {
            for element in &segment.mapping {
                let mut combination = product.clone();
                combination.push((segment.dimension_id.as_str(), element));
                next.push(combination);
            }
        }
        result = next;
    }
    result
}
