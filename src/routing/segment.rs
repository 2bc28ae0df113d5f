//! Segment configuration for the URI path resolver.
//!
//! One [`Segment`] per dimension; each maps dimension values onto URL strings.
//! All segments of a request share the first URL path component, joined by
//! the [`Separator`] (e.g. `/de_at/about` for language `de`, country `at`).

use std::fmt;

use crate::routing::error::ConfigurationError;

/// Maps one dimension value onto a URI path segment string.
///
/// An empty segment means "no segment for this value", typically the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMappingElement {
    pub dimension_value: String,
    pub uri_path_segment: String,
}

impl SegmentMappingElement {
    pub fn new(dimension_value: impl Into<String>, uri_path_segment: impl Into<String>) -> Self {
        Self {
            dimension_value: dimension_value.into(),
            uri_path_segment: uri_path_segment.into(),
        }
    }
}

/// Segment configuration for a single dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub dimension_id: String,
    pub mapping: Vec<SegmentMappingElement>,
}

impl Segment {
    pub fn new(dimension_id: impl Into<String>, mapping: Vec<SegmentMappingElement>) -> Self {
        Self {
            dimension_id: dimension_id.into(),
            mapping,
        }
    }
}

/// Ordered list of segments. Declaration order is URL order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments(Vec<Segment>);

impl Segments {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identifiers of all dimensions managed by these segments.
    pub fn dimension_ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.dimension_id.as_str())
    }
}

impl<'a> IntoIterator for &'a Segments {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Character joining the per-dimension segment strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator(char);

impl Separator {
    /// Parse a separator. Must be exactly one character and not `/`.
    pub fn new(value: &str) -> Result<Self, ConfigurationError> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '/' => Ok(Self(c)),
            _ => Err(ConfigurationError::InvalidSeparator(value.to_string())),
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self('_')
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
