//! Frontend routing: URLs ↔ content addresses.
//!
//! # Data Flow
//! ```text
//! Match (once per request):
//!     request host → site.rs (SiteDetectionResult into RouteParameters)
//!     request path → handler.rs
//!         → strip suffix / split string
//!         → DelegatingResolver (dimension space point, remaining path)
//!         → DocumentLookup::find(site, path, point hash)
//!         → address.rs (ContentAddress, serialized token)
//!     → MatchOutcome::{Matched, NoMatch}
//!
//! Resolve (per generated link):
//!     RouteValues[name] → ContentAddress
//!         → DocumentLookup::find_by_address
//!         → ShortcutResolver (node or external URI)
//!         → CrossSiteLinker (host/scheme for other sites)
//!         → DelegatingResolver (dimension constraints)
//!     → ResolveOutcome::{Resolved, CannotResolve}
//! ```

pub mod address;
pub mod handler;
pub mod result;
pub mod site;

pub use address::{AddressError, ContentAddress, WorkspaceName};
pub use handler::{FrontendRoutePartHandler, HandlerOptions};
pub use result::{
    MatchOutcome, MatchResult, ResolveOutcome, ResolveResult, RouteValue, RouteValues, RoutingError,
};
pub use site::{SiteDetectionResult, SiteRegistry};
