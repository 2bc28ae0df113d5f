//! Content dimension model.
//!
//! # Data Flow
//! ```text
//! Config ([[dimensions]])
//!     → source.rs (ConfiguredDimensionSource, legal values per dimension)
//!     → consulted once while building resolver tables
//!
//! Per request:
//!     resolvers produce coordinates
//!     → point.rs (DimensionSpacePoint, merged step by step)
//!     → point hash used as lookup key for documents
//! ```
//!
//! # Design Decisions
//! - Coordinates live in an ordered map, so equality never depends on insertion order
//! - The hash is computed once at construction and reused as a map key
//! - Points are immutable; merging returns a new point

pub mod point;
pub mod source;

pub use point::DimensionSpacePoint;
pub use source::{ConfiguredDimensionSource, ContentDimension, ContentDimensionSource};
