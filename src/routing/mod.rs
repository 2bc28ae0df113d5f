//! Dimension resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound (URL → coordinates):
//!     ResolutionContext (initial path, route parameters)
//!     → chain.rs (DelegatingResolver, resolvers in configured order)
//!         → host_prefix.rs (first host label → coordinates)
//!         → path_resolver.rs (first path segment → coordinates, consumes it)
//!     → ResolutionContext (resolved point, remaining path)
//!
//! Outbound (coordinates → URL):
//!     DimensionSpacePoint + target NodeInfo
//!     → chain.rs (same order)
//!     → constraints.rs (UriConstraints: path prefix, host prefix, …)
//!
//! Table Compilation (at startup / reload):
//!     segment.rs (Segments, Separator)
//!     → validate against the dimension source
//!     → cartesian product → forward + reverse tables
//!     → frozen inside an immutable resolver
//! ```
//!
//! # Design Decisions
//! - Resolvers compiled at startup, immutable at runtime
//! - Strategies only communicate through the threaded context/constraints
//! - Deterministic: same input always resolves to the same point
//! - Configuration problems fail the build, never a request

pub mod chain;
pub mod constraints;
pub mod context;
pub mod error;
pub mod host_prefix;
pub mod path_resolver;
pub mod resolver;
pub mod segment;

pub use chain::DelegatingResolver;
pub use constraints::UriConstraints;
pub use context::{ResolutionContext, RouteParameters};
pub use error::ConfigurationError;
pub use host_prefix::{HostPrefixMapping, HostPrefixResolver};
pub use path_resolver::UriPathResolver;
pub use resolver::DimensionResolver;
pub use segment::{Segment, SegmentMappingElement, Segments, Separator};
