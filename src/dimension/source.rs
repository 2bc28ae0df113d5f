//! Content dimension source.
//!
//! Only consulted while building resolver tables; never on the request path.

use serde::{Deserialize, Serialize};

/// A named axis of variation with its legal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDimension {
    pub id: String,
    pub values: Vec<String>,
}

impl ContentDimension {
    pub fn new(id: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `value` is legal for this dimension.
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Source of content dimension definitions.
pub trait ContentDimensionSource: Send + Sync {
    fn dimension(&self, id: &str) -> Option<&ContentDimension>;
}

/// Dimension source backed by the `[[dimensions]]` configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredDimensionSource {
    dimensions: Vec<ContentDimension>,
}

impl ConfiguredDimensionSource {
    pub fn new(dimensions: Vec<ContentDimension>) -> Self {
        Self { dimensions }
    }

    pub fn dimensions(&self) -> &[ContentDimension] {
        &self.dimensions
    }
}

impl ContentDimensionSource for ConfiguredDimensionSource {
    fn dimension(&self, id: &str) -> Option<&ContentDimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let source = ConfiguredDimensionSource::new(vec![
            ContentDimension::new("language", ["en", "de"]),
        ]);
        let language = source.dimension("language").unwrap();
        assert!(language.has_value("de"));
        assert!(!language.has_value("fr"));
        assert!(source.dimension("country").is_none());
    }
}
