//! Dimension space points.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// An immutable coordinate tuple over a subset of the configured dimensions.
///
/// Two points are equal iff their coordinate sets are equal. The hash is a
/// hex digest over the sorted coordinates and is stable across processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct DimensionSpacePoint {
    coordinates: BTreeMap<String, String>,
    hash: String,
}

impl DimensionSpacePoint {
    /// Create a point from a coordinate map.
    pub fn new(coordinates: BTreeMap<String, String>) -> Self {
        let hash = Self::compute_hash(&coordinates);
        Self { coordinates, hash }
    }

    /// The point without any coordinates.
    pub fn empty() -> Self {
        Self::new(BTreeMap::new())
    }

    /// Create a point from `(dimension, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Value of a single coordinate.
    pub fn coordinate(&self, dimension: &str) -> Option<&str> {
        self.coordinates.get(dimension).map(String::as_str)
    }

    pub fn coordinates(&self) -> &BTreeMap<String, String> {
        &self.coordinates
    }

    /// Stable content-derived hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Merge `other` into a copy of this point; coordinates of `other` win.
    pub fn with_coordinates(&self, other: &DimensionSpacePoint) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        let mut coordinates = self.coordinates.clone();
        for (dimension, value) in &other.coordinates {
            coordinates.insert(dimension.clone(), value.clone());
        }
        Self::new(coordinates)
    }

    /// Keep only the coordinates of the given dimensions.
    pub fn reduced_to<'a, I>(&self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let coordinates = dimensions
            .into_iter()
            .filter_map(|dimension| {
                self.coordinates
                    .get(dimension)
                    .map(|value| (dimension.to_string(), value.clone()))
            })
            .collect();
        Self::new(coordinates)
    }

    // Length-prefixed so that `a=bc` and `ab=c` never collide.
    fn compute_hash(coordinates: &BTreeMap<String, String>) -> String {
        let mut hasher = Sha256::new();
        for (dimension, value) in coordinates {
            hasher.update((dimension.len() as u64).to_le_bytes());
            hasher.update(dimension.as_bytes());
            hasher.update((value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
        hex::encode(&hasher.finalize()[..16])
    }
}

impl Default for DimensionSpacePoint {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<BTreeMap<String, String>> for DimensionSpacePoint {
    fn from(coordinates: BTreeMap<String, String>) -> Self {
        Self::new(coordinates)
    }
}

impl From<DimensionSpacePoint> for BTreeMap<String, String> {
    fn from(point: DimensionSpacePoint) -> Self {
        point.coordinates
    }
}

impl fmt::Display for DimensionSpacePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (dimension, value)) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{:?}:{:?}", dimension, value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = DimensionSpacePoint::from_pairs([("language", "de"), ("country", "at")]);
        let b = DimensionSpacePoint::from_pairs([("country", "at"), ("language", "de")]);
        assert_eq!(a, b);
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn test_hash_differs_per_coordinates() {
        let a = DimensionSpacePoint::from_pairs([("language", "de")]);
        let b = DimensionSpacePoint::from_pairs([("language", "en")]);
        let c = DimensionSpacePoint::from_pairs([("languag", "ede")]);
        assert_ne!(a.hash(), b.hash());
        assert_ne!(a.hash(), c.hash());
        assert_ne!(a.hash(), DimensionSpacePoint::empty().hash());
    }

    #[test]
    fn test_merge_and_reduce() {
        let base = DimensionSpacePoint::from_pairs([("language", "en"), ("country", "us")]);
        let merged = base.with_coordinates(&DimensionSpacePoint::from_pairs([("language", "de")]));
        assert_eq!(merged.coordinate("language"), Some("de"));
        assert_eq!(merged.coordinate("country"), Some("us"));

        let reduced = merged.reduced_to(["language", "device"]);
        assert_eq!(reduced, DimensionSpacePoint::from_pairs([("language", "de")]));
    }

    #[test]
    fn test_serde_as_plain_map() {
        let point = DimensionSpacePoint::from_pairs([("language", "de")]);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"language":"de"}"#);
        let decoded: DimensionSpacePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, point);
        assert_eq!(decoded.hash(), point.hash());
    }
}
