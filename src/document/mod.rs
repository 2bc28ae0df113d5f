//! Document nodes and the lookups the router depends on.
//!
//! # Data Flow
//! ```text
//! Config ([[documents]])
//!     → memory.rs (InMemoryDocumentStore, built once, read-only)
//!
//! Per request:
//!     memo.rs (MemoizedLookup, dropped at request end)
//!     → lookup.rs traits (DocumentLookup, ShortcutResolver, CrossSiteLinker)
//!     → node.rs (NodeInfo handed to the route part handler)
//! ```
//!
//! # Design Decisions
//! - "Not found" is `Ok(None)`; only real lookup failures are errors
//! - Collaborators are synchronous; async hosts call them from blocking-capable tasks

pub mod lookup;
pub mod memo;
pub mod memory;
pub mod node;

pub use lookup::{CrossSiteLinker, DocumentLookup, LookupError, ShortcutResolution, ShortcutResolver};
pub use memo::MemoizedLookup;
pub use memory::InMemoryDocumentStore;
pub use node::{NodeInfo, RouteTags, ShortcutMode};
