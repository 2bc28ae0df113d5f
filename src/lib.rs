//! Dimension-aware URL routing library.
//!
//! Maps request URLs onto content addresses (document, dimension space point,
//! workspace) and renders addresses back into URLs.

pub mod config;
pub mod dimension;
pub mod document;
pub mod frontend;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use dimension::DimensionSpacePoint;
pub use frontend::{ContentAddress, FrontendRoutePartHandler};
pub use http::HttpServer;
pub use lifecycle::{RoutingRuntime, Shutdown};
