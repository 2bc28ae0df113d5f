//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build resolvers, documents, sites → RoutingRuntime
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C / SIGTERM → broadcast → server stops accepting → drain → exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routing tables, then listeners
//! - Ordered shutdown: stop accept, drain, close

pub mod shutdown;
pub mod startup;

pub use shutdown::{shutdown_signal, Shutdown};
pub use startup::{load_runtime, RoutingRuntime};
