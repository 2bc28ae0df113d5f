//! Per-request resolution context.

use std::collections::BTreeMap;

use crate::dimension::DimensionSpacePoint;

/// Request-scoped parameters collected before routing (host, detected site).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParameters(BTreeMap<String, String>);

impl RouteParameters {
    pub const REQUEST_HOST: &'static str = "requestUriHost";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn host(&self) -> Option<&str> {
        self.get(Self::REQUEST_HOST)
    }
}

/// Threaded through the resolver chain; each step returns a new context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    initial_uri_path: String,
    remaining_uri_path: String,
    resolved_point: DimensionSpacePoint,
    route_parameters: RouteParameters,
}

impl ResolutionContext {
    pub fn new(uri_path: impl Into<String>, route_parameters: RouteParameters) -> Self {
        let uri_path = uri_path.into();
        Self {
            remaining_uri_path: uri_path.clone(),
            initial_uri_path: uri_path,
            resolved_point: DimensionSpacePoint::empty(),
            route_parameters,
        }
    }

    pub fn initial_uri_path(&self) -> &str {
        &self.initial_uri_path
    }

    /// Path left over after the resolvers that already ran.
    pub fn remaining_uri_path(&self) -> &str {
        &self.remaining_uri_path
    }

    pub fn resolved_point(&self) -> &DimensionSpacePoint {
        &self.resolved_point
    }

    pub fn route_parameters(&self) -> &RouteParameters {
        &self.route_parameters
    }

    pub fn with_remaining_uri_path(self, remaining_uri_path: impl Into<String>) -> Self {
        Self {
            remaining_uri_path: remaining_uri_path.into(),
            ..self
        }
    }

    pub fn with_added_dimension_space_point(self, point: &DimensionSpacePoint) -> Self {
        Self {
            resolved_point: self.resolved_point.with_coordinates(point),
            ..self
        }
    }
}
